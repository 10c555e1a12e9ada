//! How to handle config files and arguments.

pub mod args;
pub mod config;
mod error;

use std::{
    fs,
    io::Write,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};

pub use self::{
    args::Args,
    config::Config,
    error::{OptionError, OptionResult},
};
use self::config::StringOrNum;
use crate::{
    constants::*,
    reading::{DecimalPattern, TemperatureType},
};

/// The resolved settings, after merging the arguments over the config file.
#[derive(Clone, Debug, PartialEq)]
pub struct BatstatOptions {
    pub history_size: Option<NonZeroUsize>,
    pub temperature_type: TemperatureType,
    pub voltage_pattern: DecimalPattern,
    pub rate: Duration,
    pub replay: Option<PathBuf>,
    pub once: bool,
}

/// Returns the config path to use. If `override_config_path` is specified,
/// then we will use that. If not, then return the "default" config path.
pub fn get_config_path(override_config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(conf_loc) = override_config_path {
        return Some(conf_loc.to_path_buf());
    }

    dirs::config_dir().map(|path| path.join(DEFAULT_CONFIG_FILE_LOCATION))
}

/// Get the config at `config_path`. If there is no config file at the
/// specified path, it will try to create a new file with the default settings
/// and return the default config.
///
/// An explicitly given path must already exist, since a typo there would
/// otherwise silently create a new file.
pub fn get_or_create_config(config_path: Option<&Path>, explicit: bool) -> OptionResult<Config> {
    let Some(path) = config_path else {
        // The path was somehow None, so we can't write anything.
        return Ok(Config::default());
    };

    if let Ok(config_string) = fs::read_to_string(path) {
        return Ok(toml_edit::de::from_str(&config_string)?);
    }

    if explicit {
        return Err(OptionError::config(format!(
            "'{}' could not be read.",
            path.display()
        )));
    }

    if let Err(err) = write_default_config(path) {
        // Not being able to write a template is not worth failing over.
        log::warn!("could not write a default config to {}: {err}", path.display());
    }

    Ok(Config::default())
}

fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent_path) = path.parent() {
        fs::create_dir_all(parent_path)?;
    }

    fs::File::create(path)?.write_all(CONFIG_TEMPLATE.as_bytes())
}

/// Read the config file and merge it with the arguments.
pub fn init_options(args: &Args) -> OptionResult<BatstatOptions> {
    let override_path = args.general_args.config_location.as_deref().map(Path::new);
    let config_path = get_config_path(override_path);
    let config = get_or_create_config(config_path.as_deref(), override_path.is_some())?;

    merge_options(args, &config)
}

/// Merge the arguments over the config file. Arguments always win.
pub fn merge_options(args: &Args, config: &Config) -> OptionResult<BatstatOptions> {
    Ok(BatstatOptions {
        history_size: get_history_size(args, config)?,
        temperature_type: get_temperature(args, config)?,
        voltage_pattern: get_voltage_pattern(args, config)?,
        rate: get_rate(args, config)?,
        replay: args.general_args.replay.as_ref().map(PathBuf::from),
        once: args.general_args.once,
    })
}

fn get_history_size(args: &Args, config: &Config) -> OptionResult<Option<NonZeroUsize>> {
    if let Some(size) = args.estimator_args.history_size {
        NonZeroUsize::new(size)
            .map(Some)
            .ok_or_else(|| OptionError::invalid_arg_value("history_size"))
    } else if let Some(size) = config.estimator.history_size {
        NonZeroUsize::new(size)
            .map(Some)
            .ok_or_else(|| OptionError::invalid_config_value("history_size"))
    } else {
        Ok(None)
    }
}

fn get_temperature(args: &Args, config: &Config) -> OptionResult<TemperatureType> {
    let display = &args.display_args;

    if display.fahrenheit {
        Ok(TemperatureType::Fahrenheit)
    } else if display.kelvin {
        Ok(TemperatureType::Kelvin)
    } else if display.celsius {
        Ok(TemperatureType::Celsius)
    } else if let Some(temp_type) = &config.display.temperature_type {
        // Give lowest priority to config.
        temp_type.parse()
    } else {
        Ok(TemperatureType::Celsius)
    }
}

fn get_voltage_pattern(args: &Args, config: &Config) -> OptionResult<DecimalPattern> {
    if let Some(pattern) = &args.display_args.voltage_pattern {
        pattern.parse::<DecimalPattern>().map_err(OptionError::into_arg)
    } else if let Some(pattern) = &config.display.voltage_pattern {
        pattern.parse()
    } else {
        Ok(DecimalPattern::default())
    }
}

fn get_rate(args: &Args, config: &Config) -> OptionResult<Duration> {
    let rate = if let Some(rate) = &args.general_args.rate {
        try_parse_duration(rate).map_err(|_| OptionError::invalid_arg_value("rate"))?
    } else if let Some(rate) = &config.source.rate {
        match rate {
            StringOrNum::String(rate) => try_parse_duration(rate)
                .map_err(|_| OptionError::invalid_config_value("rate"))?,
            StringOrNum::Num(millis) => Duration::from_millis(*millis),
        }
    } else {
        DEFAULT_RATE
    };

    if rate < MIN_RATE {
        return Err(OptionError::other(format!(
            "set your polling rate to be at least {}.",
            humantime::format_duration(MIN_RATE)
        )));
    }

    Ok(rate)
}

/// Parse a duration either as a plain number of milliseconds or a human
/// duration like `5s`.
fn try_parse_duration(value: &str) -> OptionResult<Duration> {
    if let Ok(millis) = value.parse::<u64>() {
        Ok(Duration::from_millis(millis))
    } else {
        humantime::parse_duration(value)
            .map_err(|err| OptionError::other(format!("'{value}' is not a valid duration: {err}")))
    }
}
