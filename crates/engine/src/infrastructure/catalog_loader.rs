//! Scene catalog loading from JSON.

use std::path::{Path, PathBuf};

use sceneforge_domain::{CatalogDocument, CatalogError, SceneCatalog};

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON; `location` is the JSON path of the offending value.
    #[error("parse catalog at {location}: {message}")]
    Parse { location: String, message: String },

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Read, parse and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<SceneCatalog, CatalogLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&raw)?;
    tracing::info!(
        path = %path.display(),
        scenes = catalog.scenes().len(),
        initial_route = %catalog.initial_route(),
        "Loaded scene catalog"
    );
    Ok(catalog)
}

/// Parse and validate catalog JSON.
pub fn parse_catalog(raw: &str) -> Result<SceneCatalog, CatalogLoadError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let document = serde_path_to_error::deserialize::<_, CatalogDocument>(&mut deserializer)
        .map_err(|error| {
            let location = error.path().to_string();
            let source = error.into_inner();
            CatalogLoadError::Parse {
                location: if location.is_empty() {
                    ".".to_string()
                } else {
                    location
                },
                message: source.to_string(),
            }
        })?;
    Ok(SceneCatalog::try_from(document)?)
}
