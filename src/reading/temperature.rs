//! Code around temperature units.

use std::str::FromStr;

use crate::options::OptionError;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum TemperatureType {
    #[default]
    Celsius,
    Kelvin,
    Fahrenheit,
}

impl FromStr for TemperatureType {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fahrenheit" | "f" => Ok(TemperatureType::Fahrenheit),
            "kelvin" | "k" => Ok(TemperatureType::Kelvin),
            "celsius" | "c" => Ok(TemperatureType::Celsius),
            _ => Err(OptionError::config(format!(
                "'{s}' is an invalid temperature type, use one of: [kelvin, k, celsius, c, fahrenheit, f]."
            ))),
        }
    }
}

impl TemperatureType {
    /// Given a temperature in Celsius, convert it if necessary for a different
    /// unit.
    pub fn convert_from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureType::Celsius => celsius,
            TemperatureType::Kelvin => celsius + 273.15,
            TemperatureType::Fahrenheit => celsius * 1.8 + 32.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureType::Celsius => "°C",
            TemperatureType::Kelvin => "K",
            TemperatureType::Fahrenheit => "°F",
        }
    }
}
