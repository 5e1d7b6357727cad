/// Avatar selection and upload - Gateway

mod package;
mod picker;
mod pipeline;

pub use package::{asset_extension, content_type_for, upload_file_name};
pub use picker::{mime_for_path, FileImagePicker};
pub use pipeline::{AvatarUploadPipeline, PipelineOutcome};
