//! Validation for configuration values
//!
//! Each section implements [`ConfigSection`]; [`Validator`] holds the field
//! checks the sections share.

pub use crate::error::ValidationError;

/// A named part of the configuration file
pub trait ConfigSection: Default {
    /// Checks every field, returning all problems found
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Overwrites this section with `other`
    fn merge(&mut self, other: Self);

    /// Table name in the TOML file
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// A `type/subtype` MIME string without whitespace
    pub fn mime_type(value: &str, field: &str) -> Result<(), ValidationError> {
        let well_formed = match value.split_once('/') {
            Some((kind, subtype)) => {
                !kind.is_empty()
                    && !subtype.is_empty()
                    && !subtype.contains('/')
                    && !value.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if well_formed {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                "must look like type/subtype",
                value,
            ))
        }
    }

    /// A bare file extension such as `pdf`, without the leading dot
    pub fn extension(value: &str, field: &str) -> Result<(), ValidationError> {
        if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                "must be letters and digits only, without a leading dot",
                value,
            ))
        }
    }

    pub fn one_of<T>(value: &T, allowed: &[T], field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + std::fmt::Display,
    {
        if allowed.contains(value) {
            return Ok(());
        }
        let allowed_str = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationError::with_value(
            field,
            format!("must be one of: {}", allowed_str),
            value,
        ))
    }

    /// Folds individual checks into a section result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
