use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Vertex/fragment source pair, read from plain-text files at init time.
#[derive(Debug)]
pub struct ShaderSource {
    pub vert: String,
    pub frag: String,
}

impl ShaderSource {
    pub fn load(dir: &Path, vert_name: &str, frag_name: &str) -> Result<Self, ShaderLoadError> {
        Ok(Self {
            vert: read(dir.join(vert_name))?,
            frag: read(dir.join(frag_name))?,
        })
    }
}

fn read(path: PathBuf) -> Result<String, ShaderLoadError> {
    fs::read_to_string(&path).map_err(|source| ShaderLoadError::Read { path, source })
}

#[derive(Debug, Error)]
pub enum ShaderLoadError {
    #[error("could not read shader source {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_file_is_reported_with_path() {
        let err = ShaderSource::load(Path::new("/nonexistent"), "a.vert", "a.frag").unwrap_err();

        let ShaderLoadError::Read { path, .. } = err;
        assert_eq!(path, Path::new("/nonexistent/a.vert"));
    }
}
