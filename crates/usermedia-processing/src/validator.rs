use std::path::Path;

/// Common validation errors for uploaded images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,

    #[error("Not a valid image: {0}")]
    NotAnImage(String),
}

/// Image file validator
///
/// Provides validation logic for uploaded images without coupling to
/// storage implementation details. Uploads are checked by size, extension,
/// declared Content-Type, and file signature.
pub struct ImageValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl ImageValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Self::extension_of(filename)?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate that Content-Type matches the file extension
    /// This prevents Content-Type spoofing attacks where malicious files
    /// are uploaded with legitimate Content-Types.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let extension = Self::extension_of(filename)?;
        let normalized_content_type = content_type.to_lowercase();

        let expected_content_types: Vec<&str> = match extension.as_str() {
            "jpg" | "jpeg" => vec!["image/jpeg"],
            "png" => vec!["image/png"],
            "gif" => vec!["image/gif"],
            "webp" => vec!["image/webp"],
            _ => {
                // Unknown extensions are caught by validate_extension; skip
                // the cross-check here.
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping Content-Type/extension cross-validation"
                );
                return Ok(());
            }
        };

        if !expected_content_types
            .iter()
            .any(|ct| ct == &normalized_content_type)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: format!(
                    "{} (does not match extension '{}'. Expected one of: {})",
                    content_type,
                    extension,
                    expected_content_types.join(", ")
                ),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate the file signature: the bytes must carry a recognized image
    /// magic number, and it must agree with the filename extension. A renamed
    /// file with mismatched magic bytes is rejected even when its declared
    /// Content-Type looks fine.
    pub fn validate_signature(&self, filename: &str, data: &[u8]) -> Result<(), ValidationError> {
        let extension = Self::extension_of(filename)?;

        let format = image::guess_format(data)
            .map_err(|_| ValidationError::NotAnImage("unrecognized file signature".to_string()))?;

        let matches = match format {
            image::ImageFormat::Jpeg => extension == "jpg" || extension == "jpeg",
            image::ImageFormat::Png => extension == "png",
            image::ImageFormat::Gif => extension == "gif",
            image::ImageFormat::WebP => extension == "webp",
            _ => false,
        };

        if !matches {
            return Err(ValidationError::NotAnImage(format!(
                "file signature {:?} does not match extension '{}'",
                format, extension
            )));
        }

        Ok(())
    }

    /// Validate all aspects of an upload, including the file signature
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(), ValidationError> {
        self.validate_file_size(data.len())?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_extension_content_type_match(filename, content_type)?;
        self.validate_signature(filename, data)?;
        Ok(())
    }

    fn extension_of(filename: &str) -> Result<String, ValidationError> {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))
    }
}
