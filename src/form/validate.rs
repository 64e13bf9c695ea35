use derive_more::{Display, Error};

use super::field::FormField;
use super::state::FormState;

/// Text of the blocking notice shown when a required field is empty.
pub const MISSING_FIELDS_NOTICE: &str = "Please fill out all the fields before saving!";

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FormError {
    #[display("missing required field: {field}")]
    MissingRequiredField { field: FormField },
    #[display("field {field} is read-only")]
    ReadOnlyField { field: FormField },
    #[display("invalid value {value:?} for field {field}")]
    InvalidValue { field: FormField, value: String },
}

impl FormError {
    pub fn field(&self) -> FormField {
        match self {
            FormError::MissingRequiredField { field }
            | FormError::ReadOnlyField { field }
            | FormError::InvalidValue { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Pass,
    Fail(FormError),
}

impl ValidationResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }

    pub fn reason(&self) -> Option<&FormError> {
        match self {
            ValidationResult::Pass => None,
            ValidationResult::Fail(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<(), FormError> {
        match self {
            ValidationResult::Pass => Ok(()),
            ValidationResult::Fail(err) => Err(err),
        }
    }
}

/// Check that every field the selected device type needs is filled in.
///
/// Name, slave id and all register blocks are always required; the TCP
/// family adds IP address and port, the RTU family baud rate, data bits and
/// stop bits. The first empty field in page order is reported.
pub fn validate(state: &FormState) -> ValidationResult {
    let family_fields = FormField::required_for(state.family()).iter().copied();

    match FormField::always_required()
        .chain(family_fields)
        .find(|field| state.field(*field).is_empty())
    {
        Some(field) => ValidationResult::Fail(FormError::MissingRequiredField { field }),
        None => ValidationResult::Pass,
    }
}
