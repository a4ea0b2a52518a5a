use std::path::PathBuf;

/// Configuration for the persistent composition root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one redb database file per domain namespace.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("MINIMART_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".minimart")),
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
