use crate::error::{CropwiseError, Result};
use crate::models::ImageUpload;
use std::path::Path;

pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
];

pub const NO_FILE_SELECTED: &str = "No file selected";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload JPG, PNG, or GIF";
pub const FILE_TOO_LARGE: &str = "File too large. Maximum size is 16MB";

/// What is known about a file before its contents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size: u64,
}

impl ImageCandidate {
    pub fn from_path(path: &Path, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);

        Self {
            file_name,
            mime_type,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidation {
    Valid,
    Invalid(String),
}

impl ImageValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, ImageValidation::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ImageValidation::Valid => None,
            ImageValidation::Invalid(reason) => Some(reason),
        }
    }
}

pub fn validate_image(candidate: Option<&ImageCandidate>) -> ImageValidation {
    let Some(candidate) = candidate else {
        return ImageValidation::Invalid(NO_FILE_SELECTED.into());
    };

    let type_allowed = candidate
        .mime_type
        .as_deref()
        .is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m));
    if !type_allowed {
        return ImageValidation::Invalid(INVALID_FILE_TYPE.into());
    }

    if candidate.size > MAX_IMAGE_BYTES {
        return ImageValidation::Invalid(FILE_TOO_LARGE.into());
    }

    ImageValidation::Valid
}

/// Validate a file on disk and read it into memory.
/// The body is only read once metadata has passed validation.
pub async fn load_image(path: &Path) -> Result<ImageUpload> {
    let candidate = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Some(ImageCandidate::from_path(path, meta.len())),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Cannot stat {}: {}", path.display(), e);
            None
        }
    };

    let validation = validate_image(candidate.as_ref());
    let (true, Some(candidate)) = (validation.is_valid(), candidate) else {
        let reason = validation.reason().unwrap_or(NO_FILE_SELECTED);
        return Err(CropwiseError::Validation(reason.to_string()));
    };

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(
        "Loaded image {} ({} bytes)",
        candidate.file_name,
        bytes.len()
    );

    Ok(ImageUpload {
        file_name: candidate.file_name,
        mime_type: candidate.mime_type.unwrap_or_default(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: Option<&str>, size: u64) -> ImageCandidate {
        ImageCandidate {
            file_name: "soil".into(),
            mime_type: mime.map(str::to_string),
            size,
        }
    }

    #[test]
    fn absent_file_is_invalid() {
        assert_eq!(
            validate_image(None),
            ImageValidation::Invalid(NO_FILE_SELECTED.into())
        );
    }

    #[test]
    fn allowed_types_within_limit_are_valid() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_image(Some(&candidate(Some(*mime), 2 * 1024 * 1024))).is_valid());
        }
        assert!(validate_image(Some(&candidate(Some("image/png"), MAX_IMAGE_BYTES))).is_valid());
    }

    #[test]
    fn disallowed_types_are_invalid() {
        for mime in [Some("image/webp"), Some("application/pdf"), Some("text/plain"), None] {
            let result = validate_image(Some(&candidate(mime, 1024)));
            assert!(!result.is_valid(), "{:?} should be rejected", mime);
            assert_eq!(result.reason(), Some(INVALID_FILE_TYPE));
        }
    }

    #[test]
    fn oversized_files_are_invalid() {
        for size in [MAX_IMAGE_BYTES + 1, 20 * 1024 * 1024, u64::MAX] {
            let result = validate_image(Some(&candidate(Some("image/jpeg"), size)));
            assert_eq!(result.reason(), Some(FILE_TOO_LARGE));
        }
    }

    #[test]
    fn mime_type_guessed_from_extension() {
        let c = ImageCandidate::from_path(Path::new("/farm/plot-3.JPG"), 10);
        assert_eq!(c.file_name, "plot-3.JPG");
        assert_eq!(c.mime_type.as_deref(), Some("image/jpeg"));

        let c = ImageCandidate::from_path(Path::new("scan.bmp"), 10);
        assert_eq!(c.mime_type.as_deref(), Some("image/bmp"));

        let c = ImageCandidate::from_path(Path::new("notes"), 10);
        assert!(c.mime_type.is_none());
    }

    #[tokio::test]
    async fn load_image_reads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.jpg");
        std::fs::write(&path, vec![0xAB; 2 * 1024 * 1024]).unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.file_name, "field.jpg");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.size(), 2 * 1024 * 1024);
    }

    #[tokio::test]
    async fn load_image_rejects_oversized_file_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert!(matches!(err, CropwiseError::Validation(ref m) if m == FILE_TOO_LARGE));
    }

    #[tokio::test]
    async fn load_image_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_image(&dir.path().join("missing.jpg")).await.unwrap_err();
        assert!(matches!(err, CropwiseError::Validation(ref m) if m == NO_FILE_SELECTED));

        let err = load_image(dir.path()).await.unwrap_err();
        assert!(matches!(err, CropwiseError::Validation(ref m) if m == NO_FILE_SELECTED));
    }

    #[tokio::test]
    async fn load_image_rejects_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert!(matches!(err, CropwiseError::Validation(ref m) if m == INVALID_FILE_TYPE));
    }
}
