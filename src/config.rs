use serde::Deserialize;

const DEFAULT_MAX_CYCLES: u64 = 10_000;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub sim: SimConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,
}

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}
