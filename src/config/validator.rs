use thiserror::Error;

use crate::config::{RenderSettings, Settings};

const MAX_INDENT: usize = 8;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        Self::validate_render(&settings.render)
    }

    fn validate_render(render: &RenderSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if render.indent > MAX_INDENT {
            errors.push(ValidationError::InvalidValue {
                field: "render.indent".to_string(),
                reason: format!("Indent must be at most {}", MAX_INDENT),
            });
        }

        if render.form_method.is_empty() {
            errors.push(ValidationError::MissingField("render.form_method".to_string()));
        } else if !matches!(render.form_method.to_lowercase().as_str(), "get" | "post") {
            errors.push(ValidationError::InvalidValue {
                field: "render.form_method".to_string(),
                reason: format!("'{}' is not one of get, post", render.form_method),
            });
        }

        if let Some(first) = render.id_prefix.chars().next() {
            if !first.is_ascii_alphabetic() {
                errors.push(ValidationError::InvalidValue {
                    field: "render.id_prefix".to_string(),
                    reason: "Element ids must start with a letter".to_string(),
                });
            }
        }
        if render.id_prefix.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidValue {
                field: "render.id_prefix".to_string(),
                reason: "Element ids cannot contain whitespace".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
