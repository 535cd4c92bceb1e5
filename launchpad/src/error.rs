use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the launchpad core
#[derive(Debug, Error)]
pub enum LaunchpadError {
    #[error("dialog needs at least one page")]
    NoPages,

    #[error("no page registered at logical index {0}")]
    UnknownPage(usize),

    #[error("page {0} is not in the menu")]
    HiddenPage(usize),

    #[error("page {0} has no render surface")]
    MissingSurface(usize),

    #[error("failed to read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to scan scenario folder")]
    CatalogScan(#[from] walkdir::Error),
}
