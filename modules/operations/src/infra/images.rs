//! Product image files on local disk.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub struct ImageStore {
    dir: PathBuf,
}

/// A bare file name: no separators, no parent references, not hidden.
#[must_use]
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

/// Content type served for a stored image.
#[must_use]
pub fn content_type_for(filename: &str) -> mime::Mime {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

impl ImageStore {
    /// Images live in `<uploads_dir>/products`.
    #[must_use]
    pub fn new(uploads_dir: &Path) -> Self {
        Self {
            dir: uploads_dir.join("products"),
        }
    }

    /// # Errors
    /// Any I/O error creating the directory or writing the file.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "image stored");
        Ok(())
    }

    /// `None` if the file does not exist or the name is not a bare file name.
    ///
    /// # Errors
    /// I/O errors other than not-found.
    pub async fn load(&self, filename: &str) -> io::Result<Option<Vec<u8>>> {
        if !is_safe_filename(filename) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a stored image. A missing file or an unsafe name is a no-op.
    ///
    /// # Errors
    /// I/O errors other than not-found.
    pub async fn remove(&self, filename: &str) -> io::Result<()> {
        if !is_safe_filename(filename) {
            return Ok(());
        }
        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => {
                debug!(filename, "image removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
