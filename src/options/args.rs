// Argument parsing via clap.
//
// Note that you probably want to keep this as a single file that only
// depends on clap and indoc, since the build script includes it directly.
// For the same reason, it can't have inner doc comments.

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "batstat [OPTIONS]";

/// The arguments for batstat.
#[derive(Parser, Debug, Default)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    about = crate_description!(),
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct Args {
    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub estimator_args: EstimatorArgs,

    #[command(flatten)]
    pub display_args: DisplayArgs,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long = "config",
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    Unlike the default location, the file must already exist."
    )]
    pub config_location: Option<String>,

    #[arg(
        long,
        help = "Prints a summary of the current battery reading and exits.",
        long_help = "Prints a summary of a single battery reading (level, health, plug state, \
                    temperature and voltage) and exits. With --replay, the first snapshot of \
                    the trace is used."
    )]
    pub once: bool,

    #[arg(
        short = 'r',
        long,
        value_name = "TIME",
        help = "Sets how often the host battery is polled.",
        long_help = "Sets how often the host battery is polled. Takes a number in milliseconds or a \
                    human duration (e.g. 5s). The minimum is 250ms, and the default is 1s."
    )]
    pub rate: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Reads snapshots from a trace file instead of the host battery.",
        long_help = indoc! {
            "Reads snapshots from a trace file instead of the host battery, and exits once the
            trace runs out. Each line is a JSON object with a 'timestamp' in milliseconds and the
            battery extras, for example:

            {\"timestamp\": 0, \"level\": 50, \"scale\": 100, \"plugged\": 1}

            Blank lines and lines starting with '#' are skipped."
        }
    )]
    pub replay: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Estimator Options")]
pub struct EstimatorArgs {
    #[arg(
        long = "history_size",
        value_name = "N",
        help = "Only averages the last N level changes.",
        long_help = "Only averages the last N level changes when estimating. By default, every level \
                    change since charging started or stopped is used."
    )]
    pub history_size: Option<usize>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Display Options")]
pub struct DisplayArgs {
    #[arg(
        short = 'c',
        long,
        group = "temperature_unit",
        help = "Use Celsius as the temperature unit. Default.",
        long_help = "Use Celsius as the temperature unit. This is the default option."
    )]
    pub celsius: bool,

    #[arg(
        short = 'f',
        long,
        group = "temperature_unit",
        help = "Use Fahrenheit as the temperature unit."
    )]
    pub fahrenheit: bool,

    #[arg(
        short = 'k',
        long,
        group = "temperature_unit",
        help = "Use Kelvin as the temperature unit."
    )]
    pub kelvin: bool,

    #[arg(
        long = "voltage_pattern",
        value_name = "PATTERN",
        help = "Sets how voltages are rounded, e.g. '#.##'.",
        long_help = "Sets how voltages are rounded. Supports '#' (optional digit) and '0' (required \
                    digit), e.g. '#.##' or '0.000'. Defaults to '#.##'."
    )]
    pub voltage_pattern: Option<String>,
}

/// Returns a [`Command`] based off of [`Args`].
pub fn build_cmd() -> Command {
    Args::command()
}

/// Returns the parsed [`Args`].
pub fn get_args() -> Args {
    Args::parse()
}
