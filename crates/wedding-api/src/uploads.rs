use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

/// URL prefix uploaded photos are served under.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Flat directory of uploaded photos, one file per upload, named
/// `{uuid}.{ext}` so client filenames never reach the filesystem.
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    pub async fn new(dir: PathBuf) -> std::io::Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!("Upload directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to disk and return its public URL.
    pub async fn save(&self, original_name: Option<&str>, data: &[u8]) -> std::io::Result<String> {
        let file_name = match original_name.and_then(extension) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.dir.join(&file_name);
        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        info!("Stored upload {} ({} bytes)", file_name, data.len());
        Ok(format!("{}/{}", UPLOADS_PREFIX, file_name))
    }
}

/// Lower-cased extension of `name` if it is short and alphanumeric.
fn extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
