use serde::Deserialize;

/// The config file, as written by the user.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub(crate) estimator: EstimatorConfig,
    #[serde(default)]
    pub(crate) display: DisplayConfig,
    #[serde(default)]
    pub(crate) source: SourceConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct EstimatorConfig {
    pub(crate) history_size: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct DisplayConfig {
    pub(crate) temperature_type: Option<String>,
    pub(crate) voltage_pattern: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct SourceConfig {
    pub(crate) rate: Option<StringOrNum>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum StringOrNum {
    String(String),
    Num(u64),
}

impl From<String> for StringOrNum {
    fn from(value: String) -> Self {
        StringOrNum::String(value)
    }
}

impl From<u64> for StringOrNum {
    fn from(value: u64) -> Self {
        StringOrNum::Num(value)
    }
}
