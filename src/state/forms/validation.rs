//! Input checks run before leaving a step or submitting

use super::field::FieldName;
use super::form_state::{InquiryFields, Step};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Email address does not look valid")]
    InvalidEmail,
    #[error("Select at least one fabric type")]
    NoFabricType,
}

/// Loose shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Check the fields shown on `step`
pub fn validate_step(fields: &InquiryFields, step: Step) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = FieldName::for_step(step)
        .iter()
        .filter(|name| name.is_required() && fields.get(**name).trim().is_empty())
        .map(|name| ValidationError::Required(name.label()))
        .collect();

    match step {
        Step::One if !fields.email.trim().is_empty() && !is_valid_email(&fields.email) => {
            errors.push(ValidationError::InvalidEmail);
        }
        Step::Three if fields.fabric_types.is_empty() => {
            errors.push(ValidationError::NoFabricType);
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check every step, in order
pub fn validate_all(fields: &InquiryFields) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = Step::ALL
        .iter()
        .filter_map(|step| validate_step(fields, *step).err())
        .flatten()
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> InquiryFields {
        InquiryFields {
            company_name: "Acme".to_string(),
            contact_person: "Jo Doe".to_string(),
            email: "jo@acme.com".to_string(),
            phone: "+1 555 0100".to_string(),
            business_type: "garment-manufacturer".to_string(),
            fabric_types: vec!["Cotton".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  sales@fabric.example.com "));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_empty_first_step_lists_required_fields() {
        let errors = validate_step(&InquiryFields::default(), Step::One).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Required("Company Name"),
                ValidationError::Required("Contact Person"),
                ValidationError::Required("Email Address"),
                ValidationError::Required("Phone Number"),
            ]
        );
    }

    #[test]
    fn test_bad_email_reported() {
        let mut fields = filled();
        fields.email = "jo-at-acme".to_string();
        assert_eq!(
            validate_step(&fields, Step::One),
            Err(vec![ValidationError::InvalidEmail])
        );
    }

    #[test]
    fn test_optional_fields_may_stay_empty() {
        let fields = filled();
        assert!(fields.annual_volume.is_empty());
        assert!(validate_step(&fields, Step::Two).is_ok());
    }

    #[test]
    fn test_requirements_need_a_fabric_type() {
        let mut fields = filled();
        fields.fabric_types.clear();
        assert_eq!(
            validate_step(&fields, Step::Three),
            Err(vec![ValidationError::NoFabricType])
        );
    }

    #[test]
    fn test_validate_all_passes_for_complete_inquiry() {
        assert!(validate_all(&filled()).is_ok());
    }

    #[test]
    fn test_validate_all_collects_across_steps() {
        let mut fields = filled();
        fields.business_type.clear();
        fields.fabric_types.clear();
        assert_eq!(
            validate_all(&fields),
            Err(vec![
                ValidationError::Required("Business Type"),
                ValidationError::NoFabricType,
            ])
        );
    }
}
