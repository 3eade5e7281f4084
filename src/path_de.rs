//! Universe loading with JSON-path context in error messages.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::ir::{TypeDecl, Universe};

/// On-disk form of (part of) a universe.
#[derive(Debug, Deserialize)]
pub struct UniverseFile {
    pub types: Vec<TypeDecl>,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &Path) -> Result<T, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| LoadError::Json {
        path: origin.to_path_buf(),
        json_path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Merge every file into one universe; a name declared twice is an error,
/// even across files.
pub fn load_universe<I, P>(paths: I) -> Result<Universe, LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut universe = Universe::new();
    for path in paths {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: UniverseFile = from_str_with_path(&source, path)?;
        tracing::debug!(path = %path.display(), types = file.types.len(), "universe file loaded");
        for decl in file.types {
            universe.insert(decl)?;
        }
    }
    Ok(universe)
}
