use mime::Mime;

use super::{FieldError, FieldErrorKind};

/// Resume uploads above this many bytes are refused unless configured otherwise.
pub const DEFAULT_MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Media types a resume may be uploaded as.
pub const ACCEPTED_RESUME_TYPES: [Mime; 3] =
    [mime::APPLICATION_PDF, mime::IMAGE_JPEG, mime::IMAGE_PNG];

/// Reasons a selected file is refused as a resume.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("File size should be less than {}", size_label(.limit))]
    TooLarge { size: u64, limit: u64 },
    #[error("Only PDF, JPG, and PNG files are allowed")]
    UnsupportedType { mime_type: String },
}

impl AttachmentError {
    pub const fn kind(&self) -> FieldErrorKind {
        match self {
            AttachmentError::TooLarge { .. } => FieldErrorKind::TooLarge,
            AttachmentError::UnsupportedType { .. } => FieldErrorKind::UnsupportedType,
        }
    }

    pub fn to_field_error(&self) -> FieldError {
        FieldError {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

fn size_label(bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;

    if *bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if *bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Size and type limits applied whenever a resume is selected or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    max_bytes: u64,
}

impl AttachmentPolicy {
    pub fn new(max_bytes: u64) -> Self {
        let sanitized = if max_bytes > 0 {
            max_bytes
        } else {
            DEFAULT_MAX_RESUME_BYTES
        };

        Self {
            max_bytes: sanitized,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Size is checked before type, so an oversized file of the wrong type reports its size.
    pub fn check(&self, mime_type: &str, size: u64) -> Result<(), AttachmentError> {
        if size > self.max_bytes {
            return Err(AttachmentError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let accepted = mime_type
            .trim()
            .parse::<Mime>()
            .map(|parsed| {
                ACCEPTED_RESUME_TYPES
                    .iter()
                    .any(|allowed| allowed.essence_str() == parsed.essence_str())
            })
            .unwrap_or(false);

        if accepted {
            Ok(())
        } else {
            Err(AttachmentError::UnsupportedType {
                mime_type: mime_type.to_string(),
            })
        }
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESUME_BYTES)
    }
}
