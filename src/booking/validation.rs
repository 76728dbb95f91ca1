//! Per-step validation for the booking wizard.
//!
//! Validation never fails hard: each step produces a field-keyed error map,
//! and a step is valid iff that map is empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::booking::models::{BookingDraft, PriceUnit};

/// Form fields the wizard validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    BookingType,
    EventType,
    Guests,
    EventDate,
    StartTime,
    EndTime,
    CheckInDate,
    CheckOutDate,
    ClientName,
    ClientEmail,
    ClientPhone,
}

impl Field {
    /// Form key as posted by the browser
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::BookingType => "bookingType",
            Field::EventType => "eventType",
            Field::Guests => "guests",
            Field::EventDate => "eventDate",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
            Field::CheckInDate => "checkInDate",
            Field::CheckOutDate => "checkOutDate",
            Field::ClientName => "clientName",
            Field::ClientEmail => "clientEmail",
            Field::ClientPhone => "clientPhone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field -> message. A missing key means the field is fine.
pub type FieldErrors = BTreeMap<Field, String>;

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    EventDetails,
    ContactInfo,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::EventDetails,
        WizardStep::ContactInfo,
        WizardStep::Review,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            WizardStep::EventDetails => 0,
            WizardStep::ContactInfo => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::EventDetails => "Event details",
            WizardStep::ContactInfo => "Contact information",
            WizardStep::Review => "Review & confirm",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

/// Validate the fields belonging to one step.
///
/// Times are only required for single-day bookings of hourly spaces; the
/// review step has no fields of its own.
pub fn validate_step(step: WizardStep, draft: &BookingDraft, unit: PriceUnit) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::EventDetails => {
            if draft.booking_type.is_none() {
                errors.insert(Field::BookingType, "Booking type is required".to_string());
            }
            if is_blank(&draft.event_type) {
                errors.insert(Field::EventType, "Event type is required".to_string());
            }
            if draft.guests.map_or(true, |g| g < 1) {
                errors.insert(Field::Guests, "At least 1 guest is required".to_string());
            }

            if draft.is_single() {
                if draft.event_date.is_none() {
                    errors.insert(Field::EventDate, "Event date is required".to_string());
                }
                if unit == PriceUnit::Hour {
                    if draft.start_time.is_none() {
                        errors.insert(Field::StartTime, "Start time is required".to_string());
                    }
                    if draft.end_time.is_none() {
                        errors.insert(Field::EndTime, "End time is required".to_string());
                    }
                }
            }

            if draft.is_multi() {
                match (draft.check_in_date, draft.check_out_date) {
                    (Some(check_in), Some(check_out)) if check_out <= check_in => {
                        errors.insert(
                            Field::CheckOutDate,
                            "Check-out date must be after check-in date".to_string(),
                        );
                    }
                    (check_in, check_out) => {
                        if check_in.is_none() {
                            errors.insert(Field::CheckInDate, "Check-in date is required".to_string());
                        }
                        if check_out.is_none() {
                            errors.insert(Field::CheckOutDate, "Check-out date is required".to_string());
                        }
                    }
                }
            }
        }
        WizardStep::ContactInfo => {
            if is_blank(&draft.client_name) {
                errors.insert(Field::ClientName, "Name is required".to_string());
            }
            if is_blank(&draft.client_email) {
                errors.insert(Field::ClientEmail, "Email is required".to_string());
            }
            if is_blank(&draft.client_phone) {
                errors.insert(Field::ClientPhone, "Phone number is required".to_string());
            }
        }
        WizardStep::Review => {}
    }

    errors
}

pub fn is_step_valid(step: WizardStep, draft: &BookingDraft, unit: PriceUnit) -> bool {
    validate_step(step, draft, unit).is_empty()
}

/// Errors of every step merged; what a final submit checks.
pub fn validate_all(draft: &BookingDraft, unit: PriceUnit) -> FieldErrors {
    WizardStep::ALL
        .iter()
        .flat_map(|step| validate_step(*step, draft, unit))
        .collect()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
