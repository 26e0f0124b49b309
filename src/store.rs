//! Content-addressed storage for embedded license texts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Writes oversized license texts to `<dir>/<digest>.txt`.
///
/// The classifier reports such texts as `sha256:<digest>` findings and
/// never touches the filesystem itself; the store is handed the original
/// free-text license together with its digest.
#[derive(Debug)]
pub struct LicenseStore {
    dir: PathBuf,
}

impl LicenseStore {
    /// Create the backing directory (with parents) and return the store.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("can't create output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Save one license text under its digest, returning the file path.
    pub fn save(&self, digest: &str, text: &str) -> Result<PathBuf> {
        let file = self.dir.join(format!("{digest}.txt"));
        std::fs::write(&file, text)
            .with_context(|| format!("can't write license file {}", file.display()))?;
        Ok(file)
    }
}
