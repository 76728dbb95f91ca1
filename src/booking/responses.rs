//! Response DTOs for booking API endpoints.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::calculators::{round_hours, Quote};
use crate::booking::models::PriceUnit;
use crate::booking::validation::{Field, FieldErrors, WizardStep};
use crate::booking::wizard::BookingWizard;

/// Price summary for the wizard sidebar
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub duration_hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub unit: PriceUnit,
    /// False when the draft is not complete enough to price
    pub ready: bool,
}

impl QuoteResponse {
    pub fn new(quote: Quote, unit: PriceUnit) -> Self {
        Self {
            duration_hours: round_hours(quote.duration_hours),
            total_price: quote.total_price,
            unit,
            ready: !quote.is_empty(),
        }
    }
}

/// Result of validating a single step
#[derive(Debug, Serialize)]
pub struct StepValidationResponse {
    pub step: usize,
    pub valid: bool,
    pub errors: FieldErrors,
}

impl StepValidationResponse {
    pub fn new(step: WizardStep, errors: FieldErrors) -> Self {
        Self {
            step: step.index(),
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Wizard state after a transition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStateResponse {
    pub step: usize,
    pub title: &'static str,
    pub is_review: bool,
    pub can_advance: bool,
    pub visible_fields: Vec<Field>,
    pub touched: BTreeSet<Field>,
    pub errors: FieldErrors,
    pub quote: QuoteResponse,
}

impl From<&BookingWizard> for WizardStateResponse {
    fn from(wizard: &BookingWizard) -> Self {
        let step = wizard.step();
        Self {
            step: step.index(),
            title: step.title(),
            is_review: step == WizardStep::Review,
            can_advance: wizard.can_advance(),
            visible_fields: wizard.visible_fields(step),
            touched: wizard.touched().clone(),
            errors: wizard.errors_for_display(),
            quote: QuoteResponse::new(wizard.quote(), wizard.price().unit),
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
