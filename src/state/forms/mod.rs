//! Form domain layer
//!
//! Typed inquiry fields, the wizard step model and the checks the
//! presentation layer runs at step boundaries.

mod field;
mod form_state;
mod validation;

pub use field::{FieldKind, FieldName, FABRIC_TYPES};
pub use form_state::{FormState, InquiryFields, PersistenceMeta, Step, SubmissionStatus};
pub use validation::{is_valid_email, validate_all, validate_step, ValidationError};
