use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::IMAGE_EXTENSIONS;
use crate::models::{AvatarAsset, ImagePicker};
use crate::utils::{PipelineError, PipelineResult};

/// Picker over a file chosen up front (e.g. a CLI argument).
///
/// No path means the user backed out of the selection.
#[derive(Debug, Clone, Default)]
pub struct FileImagePicker {
    path: Option<PathBuf>,
}

impl FileImagePicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

/// MIME type for a supported image extension
pub fn mime_for_path(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    })
}

#[async_trait]
impl ImagePicker for FileImagePicker {
    async fn pick_image(&self) -> PipelineResult<Option<AvatarAsset>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(PipelineError::Picker(format!(
                "{} is not a file",
                path.display()
            )));
        }
        let mime_type = mime_for_path(path).ok_or_else(|| {
            PipelineError::Picker(format!("{} is not a supported image", path.display()))
        })?;

        debug!("Picked {} ({} bytes)", path.display(), metadata.len());
        Ok(Some(AvatarAsset {
            local_uri: path.display().to_string(),
            size_bytes: metadata.len(),
            mime_type,
        }))
    }

    async fn read_image(&self, asset: &AvatarAsset) -> PipelineResult<Bytes> {
        let bytes = tokio::fs::read(&asset.local_uri).await?;
        Ok(Bytes::from(bytes))
    }
}
