use crate::error::{ServiceError, ServiceResult};

/// Field-level input checks run before anything touches the database.
pub struct ValidationService;

impl ValidationService {
    /// Required text field with a maximum length in characters.
    pub fn required_text(
        field: &'static str,
        value: &str,
        max_chars: usize,
    ) -> ServiceResult<String> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ServiceError::validation(field, "cannot be empty"));
        }

        if trimmed.chars().count() > max_chars {
            return Err(ServiceError::validation(
                field,
                format!("is too long (max {} characters)", max_chars),
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Optional text field; blank input collapses to `None`.
    pub fn optional_text(
        field: &'static str,
        value: Option<&str>,
        max_chars: usize,
    ) -> ServiceResult<Option<String>> {
        let Some(value) = value else {
            return Ok(None);
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed.chars().count() > max_chars {
            return Err(ServiceError::validation(
                field,
                format!("is too long (max {} characters)", max_chars),
            ));
        }

        Ok(Some(trimmed.to_string()))
    }

    /// Required free-text field with no length cap.
    pub fn required_content(field: &'static str, value: &str) -> ServiceResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::validation(field, "cannot be empty"));
        }
        Ok(trimmed.to_string())
    }

    /// Small positive counter fields (estimates, durations, counts).
    pub fn small_positive(field: &'static str, value: i32) -> ServiceResult<i32> {
        if !(0..=32_767).contains(&value) {
            return Err(ServiceError::validation(
                field,
                "must be between 0 and 32767",
            ));
        }
        Ok(value)
    }
}
