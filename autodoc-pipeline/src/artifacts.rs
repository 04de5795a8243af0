//! Flat-file persistence for run outputs.

use std::path::{Path, PathBuf};

/// Writes named files into one directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(&self, name: &str, contents: impl AsRef<[u8]>) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents).await?;
        Ok(path)
    }

    /// Like [`save`](Self::save), but a failure is logged and reported as `None`.
    pub async fn save_logged(&self, name: &str, contents: impl AsRef<[u8]>) -> Option<PathBuf> {
        match self.save(name, contents).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "artifact saved");
                Some(path)
            }
            Err(e) => {
                tracing::error!(
                    file = name,
                    dir = %self.dir.display(),
                    error = %e,
                    "could not save artifact"
                );
                None
            }
        }
    }
}
