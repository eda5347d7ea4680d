//! Client-side checks for product image uploads.

use crate::error::ApiError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];

/// `accept` attribute for the file input.
pub const IMAGE_ACCEPT: &str = "image/jpeg,image/png,image/jpg,image/webp";

#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type as reported by the platform, if any.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Guess an image MIME type from a file name.
pub fn mime_from_name(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Check type and size; returns the MIME type to send.
pub fn validate_image(upload: &ImageUpload) -> Result<String, ApiError> {
    let mime = upload
        .mime
        .as_deref()
        .filter(|m| !m.is_empty())
        .or_else(|| mime_from_name(&upload.file_name))
        .unwrap_or_default();

    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(ApiError::Upload(
            "Ugyldig filtype. Kun JPEG, PNG og WebP er tillatt.".to_string(),
        ));
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::Upload(
            "Filen er for stor. Maksimal størrelse er 5MB.".to_string(),
        ));
    }
    Ok(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: Option<&str>, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            mime: mime.map(str::to_string),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn test_accepts_allowed_types() {
        assert_eq!(validate_image(&upload("a.webp", None, 10)).unwrap(), "image/webp");
        assert_eq!(
            validate_image(&upload("a", Some("image/jpg"), 10)).unwrap(),
            "image/jpg"
        );
        assert_eq!(validate_image(&upload("A.JPEG", None, 10)).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(validate_image(&upload("a.gif", None, 10)).is_err());
        assert!(validate_image(&upload("noext", None, 10)).is_err());
        assert!(validate_image(&upload("a.png", Some("text/plain"), 10)).is_err());
    }

    #[test]
    fn test_size_limit() {
        assert!(validate_image(&upload("a.png", None, MAX_IMAGE_BYTES)).is_ok());
        let err = validate_image(&upload("a.png", None, MAX_IMAGE_BYTES + 1)).unwrap_err();
        assert_eq!(err.to_string(), "Filen er for stor. Maksimal størrelse er 5MB.");
    }
}
