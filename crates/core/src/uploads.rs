//! Upload validation rules and storage-filename generation.
//!
//! Chat attachments and portfolio images each have their own mimetype
//! allow-list and size ceiling. Validation happens before anything touches
//! the database or the filesystem, so a rejected file never leaves partial
//! rows behind.

use uuid::Uuid;

use crate::error::CoreError;

/// Mimetypes accepted as chat message attachments.
pub const CHAT_ALLOWED_MIMETYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Mimetypes accepted as portfolio images.
pub const PORTFOLIO_ALLOWED_MIMETYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Per-file size ceiling for chat attachments (10 MB).
pub const MAX_CHAT_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of attachments on a single chat message.
pub const MAX_CHAT_FILES: usize = 5;

/// Size ceiling for portfolio images (5 MB).
pub const MAX_PORTFOLIO_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Validate a chat attachment against the allow-list and size ceiling.
pub fn validate_chat_file(mimetype: &str, size: usize) -> Result<(), CoreError> {
    if !CHAT_ALLOWED_MIMETYPES.contains(&mimetype) {
        return Err(CoreError::Validation(format!(
            "File type '{mimetype}' is not allowed"
        )));
    }
    if size > MAX_CHAT_FILE_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds the {} MB limit",
            MAX_CHAT_FILE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Validate a portfolio image against the allow-list and size ceiling.
pub fn validate_portfolio_image(mimetype: &str, size: usize) -> Result<(), CoreError> {
    if !PORTFOLIO_ALLOWED_MIMETYPES.contains(&mimetype) {
        return Err(CoreError::Validation(format!(
            "Image type '{mimetype}' is not allowed. Only images are accepted"
        )));
    }
    if size > MAX_PORTFOLIO_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "Image exceeds the {} MB limit",
            MAX_PORTFOLIO_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Storage filename for a chat attachment: `{uuid}_{original}`.
///
/// The UUID prefix avoids collisions between uploads that share an original
/// name; the original name stays embedded for easier debugging on disk and
/// is also retained as row metadata for display.
pub fn chat_storage_filename(original_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize(original_name))
}

/// Storage filename for a portfolio image: `{uuid}{ext}`, extension
/// preserved from the original name.
pub fn image_storage_filename(original_name: &str) -> String {
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            format!("{}.{}", Uuid::new_v4(), ext.to_lowercase())
        }
        _ => Uuid::new_v4().to_string(),
    }
}

/// Strip path separators from a client-supplied filename so it cannot
/// escape the upload directory.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_chat_mimetypes() {
        for mime in CHAT_ALLOWED_MIMETYPES {
            assert!(validate_chat_file(mime, 1024).is_ok(), "{mime} should pass");
        }
    }

    #[test]
    fn rejects_executable_attachment() {
        let result = validate_chat_file("application/x-msdownload", 1024);
        assert!(result.is_err(), "executable mimetype must be rejected");
    }

    #[test]
    fn rejects_oversized_attachment() {
        let result = validate_chat_file("image/png", MAX_CHAT_FILE_BYTES + 1);
        assert!(result.is_err());
    }

    #[test]
    fn attachment_at_size_limit_passes() {
        assert!(validate_chat_file("image/png", MAX_CHAT_FILE_BYTES).is_ok());
    }

    #[test]
    fn portfolio_rejects_pdf() {
        // PDFs are fine in chat but portfolio uploads are images only.
        assert!(validate_portfolio_image("application/pdf", 1024).is_err());
        assert!(validate_portfolio_image("image/jpeg", 1024).is_ok());
    }

    #[test]
    fn chat_storage_name_keeps_original() {
        let name = chat_storage_filename("report.pdf");
        assert!(name.ends_with("_report.pdf"));
        // UUID prefix means two uploads of the same file never collide.
        assert_ne!(name, chat_storage_filename("report.pdf"));
    }

    #[test]
    fn chat_storage_name_strips_path_separators() {
        let name = chat_storage_filename("../../etc/passwd");
        assert!(!name.contains('/'));
    }

    #[test]
    fn image_storage_name_preserves_extension() {
        let name = image_storage_filename("Screenshot.PNG");
        assert!(name.ends_with(".png"));

        let bare = image_storage_filename("noextension");
        assert!(!bare.contains('.'));
    }
}
