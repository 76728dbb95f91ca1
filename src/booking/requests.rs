//! Request DTOs for booking API endpoints.

use std::collections::BTreeSet;

use serde::Deserialize;
use validator::Validate;

use crate::booking::models::{BookingDraft, SpacePrice};
use crate::booking::validation::{Field, FieldErrors};

/// Quote against an inline price (no backend lookup)
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub price: SpacePrice,
    #[serde(default)]
    pub draft: BookingDraft,
}

/// Wizard state posted back by the browser
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardRequest {
    #[serde(default)]
    pub step: usize,
    #[serde(default)]
    pub draft: BookingDraft,
    #[serde(default)]
    pub touched: BTreeSet<Field>,
}

/// Contact details as checked by the form layer before submitting
#[derive(Debug, Validate)]
pub struct ContactForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub client_email: String,
}

impl ContactForm {
    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self {
            client_email: draft.client_email.trim().to_string(),
        }
    }

    /// Format errors keyed like the step validator's. Blank emails are left
    /// to the step validator.
    pub fn format_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.client_email.is_empty() {
            return errors;
        }

        if let Err(e) = self.validate() {
            if let Some(field_errors) = e.field_errors().get("client_email") {
                let message = field_errors
                    .first()
                    .and_then(|err| err.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid email".to_string());
                errors.insert(Field::ClientEmail, message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(email: &str) -> ContactForm {
        ContactForm::from_draft(&BookingDraft {
            client_email: email.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_valid_email_has_no_errors() {
        assert!(form("ana@example.com").format_errors().is_empty());
        assert!(form("  ana@example.com ").format_errors().is_empty());
    }

    #[test]
    fn test_malformed_email() {
        let errors = form("ana.example.com").format_errors();
        assert_eq!(errors[&Field::ClientEmail], "Enter a valid email address");
    }

    #[test]
    fn test_blank_email_left_to_step_validator() {
        assert!(form("   ").format_errors().is_empty());
    }

    #[test]
    fn test_wizard_request_defaults() {
        let request: WizardRequest = serde_json::from_value(json!({
            "touched": ["startTime", "guests"]
        }))
        .unwrap();

        assert_eq!(request.step, 0);
        assert_eq!(request.draft, BookingDraft::default());
        assert!(request.touched.contains(&Field::StartTime));
        assert!(request.touched.contains(&Field::Guests));
    }
}
