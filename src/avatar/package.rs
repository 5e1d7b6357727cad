use bytes::Bytes;

use crate::constants::AVATAR_FIELD_KEY;
use crate::models::{AvatarAsset, MultipartPayload, UserProfile};
use crate::utils::{PipelineError, PipelineResult};

/// Extension of the picked file, lower-cased.
///
/// Falls back to the MIME subtype (`image/png` -> `png`) when the URI has none.
pub fn asset_extension(asset: &AvatarAsset) -> Option<String> {
    let path = asset
        .local_uri
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    let from_uri = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty());
    let from_mime = || {
        asset
            .mime_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty())
    };

    from_uri.or_else(from_mime).map(str::to_lowercase)
}

/// Upload name: display name without whitespace, lower-cased, plus extension
pub fn upload_file_name(profile: &UserProfile, extension: &str) -> String {
    let mut base: String = profile.name().split_whitespace().collect::<String>();
    if base.is_empty() {
        base = profile.id().to_string();
    }
    format!("{}.{}", base.to_lowercase(), extension)
}

pub fn content_type_for(extension: &str) -> String {
    match extension {
        "jpg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    }
}

/// Wrap the image bytes into the single-field upload envelope
pub fn package(
    asset: &AvatarAsset,
    profile: &UserProfile,
    bytes: Bytes,
) -> PipelineResult<MultipartPayload> {
    let extension = asset_extension(asset).ok_or_else(|| {
        PipelineError::Picker(format!("Cannot determine image type of {}", asset.local_uri))
    })?;

    Ok(MultipartPayload {
        field: AVATAR_FIELD_KEY.to_string(),
        file_name: upload_file_name(profile, &extension),
        content_type: content_type_for(&extension),
        bytes,
    })
}
