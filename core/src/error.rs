use std::path::PathBuf;

use lingering_types::ConfigKey;
use thiserror::Error;

/// Errors from loading or persisting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config from {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to store config to {path:?}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("config key {0} cannot be written back")]
    ReadOnlyKey(ConfigKey),
}
