use std::path::Path;

use thiserror::Error;

/// Hard ceiling for chat and item attachments.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("file is {size} bytes, the limit is {MAX_ATTACHMENT_BYTES} (5 MiB)")]
    TooLarge { size: u64 },
    #[error("'{filename}' is not an image or video file")]
    UnsupportedType { filename: String },
    #[error("could not read '{filename}': {reason}")]
    Unreadable { filename: String, reason: String },
}

/// A validated attachment, ready to become a multipart `image` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Content type derived from the file extension. The accepted set is the
/// server's image gate widened with the video types the apps exchange.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

/// Validate type and size before any byte is read or sent.
pub fn validate(filename: &str, size: u64) -> Result<&'static str, AttachmentError> {
    let content_type = content_type_for(filename).ok_or_else(|| AttachmentError::UnsupportedType {
        filename: filename.to_string(),
    })?;
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge { size });
    }
    Ok(content_type)
}

/// Load a file from disk into a validated [`Attachment`].
///
/// The size check runs against file metadata, so an oversized file is
/// rejected without reading its contents.
pub async fn load(path: &Path) -> Result<Attachment, AttachmentError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| AttachmentError::Unreadable {
            filename: filename.clone(),
            reason: e.to_string(),
        })?;
    let content_type = validate(&filename, meta.len())?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AttachmentError::Unreadable {
            filename: filename.clone(),
            reason: e.to_string(),
        })?;
    Ok(Attachment {
        filename,
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn oversized_file_is_rejected_before_any_upload() {
        let err = validate("photo.jpg", 6 * MIB).unwrap_err();
        assert_eq!(err, AttachmentError::TooLarge { size: 6 * MIB });
    }

    #[test]
    fn four_mib_image_is_accepted() {
        assert_eq!(validate("photo.jpg", 4 * MIB), Ok("image/jpeg"));
    }

    #[test]
    fn boundary_size_is_accepted() {
        assert_eq!(validate("photo.png", MAX_ATTACHMENT_BYTES), Ok("image/png"));
        assert!(validate("photo.png", MAX_ATTACHMENT_BYTES + 1).is_err());
    }

    #[test]
    fn non_media_types_are_rejected() {
        assert_eq!(
            validate("notes.pdf", 100),
            Err(AttachmentError::UnsupportedType {
                filename: "notes.pdf".to_string()
            })
        );
        assert!(validate("no_extension", 100).is_err());
    }

    #[test]
    fn video_types_pass_the_gate() {
        assert_eq!(content_type_for("clip.MP4"), Some("video/mp4"));
        assert_eq!(content_type_for("clip.webm"), Some("video/webm"));
    }
}
