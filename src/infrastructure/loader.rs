//! Adventure file loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::services::{CamlFormat, CamlParser, ParseError};
use crate::domain::aggregates::AdventurePack;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl CamlFormat {
    /// Format implied by a `.json`, `.yaml` or `.yml` extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Read a file and parse it, picking the format from its extension
#[instrument(skip(parser))]
pub fn load_adventure(
    path: &Path,
    fallback_format: CamlFormat,
    parser: &CamlParser,
) -> Result<AdventurePack, LoadError> {
    let format = CamlFormat::from_path(path).unwrap_or(fallback_format);
    debug!(%format, "Loading adventure file");

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parser
        .parse(&content, format)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
