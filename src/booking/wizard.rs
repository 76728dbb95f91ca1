//! Booking wizard state machine.
//!
//! The wizard is the single owner of the draft being edited. Steps only move
//! forward when the current step validates; failing fields are marked as
//! touched so their messages show inline.

use std::collections::BTreeSet;

use crate::booking::calculators::{calculate_quote, Quote};
use crate::booking::models::{BookingDraft, PriceUnit, SpacePrice};
use crate::booking::submission::{build_submission, BookingSubmission};
use crate::booking::validation::{validate_all, validate_step, Field, FieldErrors, WizardStep};

/// Why a submission could not be produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Booking can only be submitted from the review step (current: {0:?})")]
    NotAtReview(WizardStep),

    #[error("Booking has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("Booking total could not be priced")]
    Unpriced,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    price: SpacePrice,
    step: WizardStep,
    draft: BookingDraft,
    touched: BTreeSet<Field>,
}

impl BookingWizard {
    /// Fresh wizard with an empty draft
    pub fn new(price: SpacePrice) -> Self {
        Self::resume(price, WizardStep::EventDetails, BookingDraft::default(), BTreeSet::new())
    }

    /// Rebuild a wizard from state the browser sent back
    pub fn resume(
        price: SpacePrice,
        step: WizardStep,
        draft: BookingDraft,
        touched: BTreeSet<Field>,
    ) -> Self {
        Self {
            price,
            step,
            draft,
            touched,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn price(&self) -> &SpacePrice {
        &self.price
    }

    pub fn touched(&self) -> &BTreeSet<Field> {
        &self.touched
    }

    /// Replace the draft with the latest form values
    pub fn update(&mut self, draft: BookingDraft) {
        self.draft = draft;
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn quote(&self) -> Quote {
        calculate_quote(&self.price, &self.draft)
    }

    /// Fields shown on a step given the booking type and price unit
    pub fn visible_fields(&self, step: WizardStep) -> Vec<Field> {
        match step {
            WizardStep::EventDetails => {
                let mut fields = vec![Field::BookingType];
                if self.draft.is_single() {
                    fields.push(Field::EventDate);
                    if self.price.unit == PriceUnit::Hour {
                        fields.extend([Field::StartTime, Field::EndTime]);
                    }
                }
                if self.draft.is_multi() {
                    fields.extend([Field::CheckInDate, Field::CheckOutDate]);
                }
                fields.extend([Field::EventType, Field::Guests]);
                fields
            }
            WizardStep::ContactInfo => vec![Field::ClientName, Field::ClientEmail, Field::ClientPhone],
            WizardStep::Review => Vec::new(),
        }
    }

    /// All errors of the current step
    pub fn current_errors(&self) -> FieldErrors {
        validate_step(self.step, &self.draft, self.price.unit)
    }

    /// Current-step errors limited to fields the user has touched
    pub fn errors_for_display(&self) -> FieldErrors {
        self.current_errors()
            .into_iter()
            .filter(|(field, _)| self.touched.contains(field))
            .collect()
    }

    pub fn can_advance(&self) -> bool {
        !self.step.is_last() && self.current_errors().is_empty()
    }

    /// Advance one step if the current one validates.
    ///
    /// On failure every erroring field is marked touched and the errors are
    /// returned; the step does not change. On the review step this is a no-op.
    pub fn next(&mut self) -> Result<WizardStep, FieldErrors> {
        let errors = self.current_errors();
        if !errors.is_empty() {
            self.touched.extend(errors.keys().copied());
            tracing::debug!(step = ?self.step, errors = errors.len(), "wizard step blocked");
            return Err(errors);
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step; stays on the first step
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Payload for the backend, available once the review step is reached
    /// and every step validates.
    pub fn submission(&self, space_id: &str) -> Result<BookingSubmission, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview(self.step));
        }

        let mut errors = validate_all(&self.draft, self.price.unit);
        if errors.is_empty() && self.quote().is_empty() {
            match (self.draft.start_time, self.draft.end_time) {
                (Some(start), Some(end)) if self.price.unit == PriceUnit::Hour && end <= start => {
                    errors.insert(Field::EndTime, "End time must be after start time".to_string());
                }
                _ => return Err(WizardError::Unpriced),
            }
        }
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors));
        }

        build_submission(space_id, &self.price, &self.draft).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.insert(Field::BookingType, "Booking type is required".to_string());
            WizardError::Invalid(errors)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::BookingType;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn hourly() -> SpacePrice {
        SpacePrice {
            amount: dec!(100),
            unit: PriceUnit::Hour,
        }
    }

    fn event_details() -> BookingDraft {
        BookingDraft {
            booking_type: Some(BookingType::Single),
            event_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            start_time: NaiveTime::from_hms_opt(14, 0, 0),
            end_time: NaiveTime::from_hms_opt(16, 30, 0),
            event_type: "Workshop".to_string(),
            guests: Some(8),
            ..Default::default()
        }
    }

    fn complete() -> BookingDraft {
        BookingDraft {
            client_name: "Ana".to_string(),
            client_email: "ana@example.com".to_string(),
            client_phone: "555-0100".to_string(),
            ..event_details()
        }
    }

    #[test]
    fn test_next_blocked_marks_fields_touched() {
        let mut wizard = BookingWizard::new(hourly());
        assert!(wizard.errors_for_display().is_empty());

        let errors = wizard.next().unwrap_err();

        assert_eq!(wizard.step(), WizardStep::EventDetails);
        assert!(errors.contains_key(&Field::BookingType));
        assert!(wizard.touched().contains(&Field::BookingType));
        assert_eq!(wizard.errors_for_display(), errors);
    }

    #[test]
    fn test_display_errors_only_for_touched_fields() {
        let mut wizard = BookingWizard::new(hourly());
        wizard.touch(Field::EventType);

        let shown = wizard.errors_for_display();
        assert_eq!(shown.keys().copied().collect::<Vec<_>>(), vec![Field::EventType]);
    }

    #[test]
    fn test_walk_through_to_submission() {
        let mut wizard = BookingWizard::new(hourly());
        wizard.update(event_details());

        assert_eq!(wizard.next(), Ok(WizardStep::ContactInfo));
        assert!(wizard.next().is_err()); // contact info missing

        wizard.update(complete());
        assert!(wizard.can_advance());
        assert_eq!(wizard.next(), Ok(WizardStep::Review));
        assert!(!wizard.can_advance());
        assert_eq!(wizard.next(), Ok(WizardStep::Review));

        let submission = wizard.submission("loft-1").unwrap();
        assert_eq!(submission.total_price, dec!(300));
        assert_eq!(submission.client_name, "Ana");
    }

    #[test]
    fn test_back_never_goes_below_first_step() {
        let mut wizard = BookingWizard::resume(hourly(), WizardStep::ContactInfo, complete(), BTreeSet::new());
        assert_eq!(wizard.back(), WizardStep::EventDetails);
        assert_eq!(wizard.back(), WizardStep::EventDetails);
    }

    #[test]
    fn test_submission_requires_review_step() {
        let wizard = BookingWizard::resume(hourly(), WizardStep::ContactInfo, complete(), BTreeSet::new());
        assert_eq!(
            wizard.submission("loft-1"),
            Err(WizardError::NotAtReview(WizardStep::ContactInfo))
        );
    }

    #[test]
    fn test_submission_rejects_unpriced_hourly_span() {
        let draft = BookingDraft {
            start_time: NaiveTime::from_hms_opt(16, 0, 0),
            end_time: NaiveTime::from_hms_opt(16, 0, 0),
            ..complete()
        };
        let wizard = BookingWizard::resume(hourly(), WizardStep::Review, draft, BTreeSet::new());

        match wizard.submission("loft-1") {
            Err(WizardError::Invalid(errors)) => {
                assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::EndTime]);
                assert_eq!(errors[&Field::EndTime], "End time must be after start time");
            }
            other => panic!("expected invalid submission, got {:?}", other),
        }
    }

    #[test]
    fn test_submission_rejects_overflowing_total() {
        let price = SpacePrice {
            amount: rust_decimal::Decimal::MAX,
            unit: PriceUnit::Hour,
        };
        let wizard = BookingWizard::resume(price, WizardStep::Review, complete(), BTreeSet::new());
        assert_eq!(wizard.submission("loft-1"), Err(WizardError::Unpriced));
    }

    #[test]
    fn test_submission_revalidates_all_steps() {
        let wizard = BookingWizard::resume(hourly(), WizardStep::Review, event_details(), BTreeSet::new());
        match wizard.submission("loft-1") {
            Err(WizardError::Invalid(errors)) => assert!(errors.contains_key(&Field::ClientEmail)),
            other => panic!("expected invalid submission, got {:?}", other),
        }
    }

    #[test]
    fn test_visible_fields_follow_booking_type_and_unit() {
        let mut wizard = BookingWizard::new(hourly());
        assert_eq!(
            wizard.visible_fields(WizardStep::EventDetails),
            vec![Field::BookingType, Field::EventType, Field::Guests]
        );

        wizard.update(event_details());
        assert_eq!(
            wizard.visible_fields(WizardStep::EventDetails),
            vec![
                Field::BookingType,
                Field::EventDate,
                Field::StartTime,
                Field::EndTime,
                Field::EventType,
                Field::Guests
            ]
        );

        let daily = SpacePrice {
            amount: dec!(500),
            unit: PriceUnit::Day,
        };
        let wizard = BookingWizard::resume(daily, WizardStep::EventDetails, event_details(), BTreeSet::new());
        assert!(!wizard.visible_fields(WizardStep::EventDetails).contains(&Field::StartTime));

        let multi = BookingDraft {
            booking_type: Some(BookingType::Multi),
            ..Default::default()
        };
        let wizard = BookingWizard::resume(hourly(), WizardStep::EventDetails, multi, BTreeSet::new());
        let fields = wizard.visible_fields(WizardStep::EventDetails);
        assert!(fields.contains(&Field::CheckInDate));
        assert!(!fields.contains(&Field::EventDate));
        assert!(wizard.visible_fields(WizardStep::Review).is_empty());
    }

    #[test]
    fn test_switching_booking_type_keeps_values_but_changes_quote() {
        let mut wizard = BookingWizard::new(hourly());
        wizard.update(event_details());
        assert_eq!(wizard.quote().total_price, dec!(300));

        let mut draft = wizard.draft().clone();
        draft.booking_type = Some(BookingType::Multi);
        wizard.update(draft);

        assert!(wizard.quote().is_empty());
        assert_eq!(wizard.draft().start_time, NaiveTime::from_hms_opt(14, 0, 0));
    }
}
