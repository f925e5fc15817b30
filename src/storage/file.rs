use super::blob::BlobStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed blob store: one `<key>.json` file per key under a data
/// directory. Writes replace the file atomically so a crash mid-write
/// never leaves a half-written collection behind.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

/// Platform-appropriate default data directory for the app's collections.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("sugarless"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.local/share/sugarless",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory.
    pub fn open_default() -> Self {
        Self::new(get_data_dir())
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create data directory at {}", self.dir.display())
            })?;
        }
        Ok(())
    }
}

fn write_atomic(path: &Path, value: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(value.as_bytes())
        .with_context(|| format!("Failed to write blob at {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to commit blob at {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read blob at {}", path.display()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        write_atomic(&self.blob_path(key), value)
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            let path = self.blob_path(key);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove blob at {}", path.display()));
                }
            }
        }
        Ok(())
    }
}
