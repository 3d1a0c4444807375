//! Headless client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for a headless skirmish run.
#[derive(Clone, Debug)]
pub struct SkirmishConfig {
    pub data_dir: PathBuf,
    pub map: String,
    pub max_turns: u32,
    pub log_dir: Option<PathBuf>,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            data_dir: tactics_content::sample_data_dir(),
            map: "arena".into(),
            max_turns: 40,
            log_dir: None,
        }
    }
}

impl SkirmishConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - Content directory (default: bundled sample data)
    /// - `SKIRMISH_MAP` - Map name under `maps/` (default: arena)
    /// - `SKIRMISH_TURNS` - Turn limit (default: 40)
    /// - `SKIRMISH_LOG_DIR` - Also write logs to `skirmish.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SKIRMISH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(map) = env::var("SKIRMISH_MAP") {
            config.map = map;
        }
        if let Some(turns) = read_env::<u32>("SKIRMISH_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.log_dir = env::var("SKIRMISH_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
