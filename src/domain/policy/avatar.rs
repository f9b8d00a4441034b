//! Constraints an avatar image must meet before it reaches storage.

use serde_json::json;

use crate::error::AppError;

/// Largest accepted avatar, in bytes (5 MiB).
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Accepted avatar image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl AvatarFormat {
    pub const ALL: [AvatarFormat; 4] = [Self::Jpeg, Self::Png, Self::Webp, Self::Gif];

    /// Maps a `Content-Type` value, ignoring parameters and case.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

/// Why an avatar was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvatarRejection {
    #[error("File size must be less than 5MB")]
    TooLarge { size: usize },

    #[error("Please upload a valid image file (JPEG, PNG, WebP, or GIF)")]
    UnsupportedType { content_type: String },
}

impl From<AvatarRejection> for AppError {
    fn from(e: AvatarRejection) -> Self {
        let details = match &e {
            AvatarRejection::TooLarge { size } => {
                json!({ "size": size, "max_size": MAX_AVATAR_BYTES })
            }
            AvatarRejection::UnsupportedType { content_type } => json!({
                "content_type": content_type,
                "allowed": AvatarFormat::ALL.iter().map(AvatarFormat::mime).collect::<Vec<_>>(),
            }),
        };
        AppError::bad_request(e.to_string(), details)
    }
}

/// Checks size and type of an upload.
///
/// # Errors
///
/// Returns [`AvatarRejection::TooLarge`] above [`MAX_AVATAR_BYTES`] and
/// [`AvatarRejection::UnsupportedType`] for anything but JPEG, PNG, WebP or GIF.
pub fn validate_avatar(content_type: &str, size: usize) -> Result<AvatarFormat, AvatarRejection> {
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarRejection::TooLarge { size });
    }

    AvatarFormat::from_mime(content_type).ok_or_else(|| AvatarRejection::UnsupportedType {
        content_type: content_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        assert_eq!(validate_avatar("image/png", 10), Ok(AvatarFormat::Png));
        assert_eq!(validate_avatar("image/jpeg", 10), Ok(AvatarFormat::Jpeg));
        assert_eq!(validate_avatar("IMAGE/WEBP", 10), Ok(AvatarFormat::Webp));
        assert_eq!(validate_avatar("image/gif; charset=binary", 10), Ok(AvatarFormat::Gif));
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(matches!(
            validate_avatar("image/svg+xml", 10),
            Err(AvatarRejection::UnsupportedType { .. })
        ));
        assert!(matches!(
            validate_avatar("", 10),
            Err(AvatarRejection::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_avatar("image/png", MAX_AVATAR_BYTES).is_ok());
        assert_eq!(
            validate_avatar("image/png", MAX_AVATAR_BYTES + 1),
            Err(AvatarRejection::TooLarge {
                size: MAX_AVATAR_BYTES + 1
            })
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        assert!(matches!(
            validate_avatar("text/plain", MAX_AVATAR_BYTES + 1),
            Err(AvatarRejection::TooLarge { .. })
        ));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(AvatarFormat::Jpeg.extension(), "jpg");
        assert_eq!(AvatarFormat::Webp.mime(), "image/webp");
    }
}
