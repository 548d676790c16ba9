use crate::utils::error::{MockeryError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let value = path.to_string_lossy();

    if value.is_empty() {
        return Err(MockeryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if value.contains('\0') {
        return Err(MockeryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A crate name usable in a generated `use` path.
pub fn validate_crate_name(field_name: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);

    if !head_ok || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(MockeryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Not a valid crate identifier".to_string(),
        });
    }

    Ok(())
}

pub fn validate_service_ids(field_name: &str, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(MockeryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "No service selected".to_string(),
        });
    }

    for id in ids {
        let plain = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !plain {
            return Err(MockeryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.clone(),
                reason: "Service ids must be plain directory names".to_string(),
            });
        }
    }

    Ok(())
}
