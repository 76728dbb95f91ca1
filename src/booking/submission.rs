//! Booking submission payload sent to the backend.
//!
//! The draft fields that belong to the chosen booking type are kept, the rest
//! are dropped, and date/time inputs are combined into datetimes.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::calculators::calculate_quote;
use crate::booking::models::{BookingDraft, BookingType, PaymentMethod, PriceUnit, SpacePrice};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub space_id: String,
    pub booking_type: BookingType,

    pub event_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,

    pub start_date_time: Option<NaiveDateTime>,
    pub end_date_time: Option<NaiveDateTime>,

    pub guests: i32,
    pub event_type: String,
    pub special_requests: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub payment_method: PaymentMethod,

    #[serde(with = "rust_decimal::serde::str")]
    pub duration_hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
}

/// Build the payload for an already validated draft.
///
/// Returns `None` when the draft has no booking type yet.
pub fn build_submission(
    space_id: &str,
    price: &SpacePrice,
    draft: &BookingDraft,
) -> Option<BookingSubmission> {
    let booking_type = draft.booking_type?;
    let quote = calculate_quote(price, draft);
    let (start_date_time, end_date_time) = combined_datetimes(price.unit, draft);

    let single = booking_type == BookingType::Single;
    let hourly = single && price.unit == PriceUnit::Hour;

    Some(BookingSubmission {
        space_id: space_id.to_string(),
        booking_type,
        event_date: draft.event_date.filter(|_| single),
        start_time: draft.start_time.filter(|_| hourly),
        end_time: draft.end_time.filter(|_| hourly),
        check_in_date: draft.check_in_date.filter(|_| !single),
        check_out_date: draft.check_out_date.filter(|_| !single),
        start_date_time,
        end_date_time,
        guests: draft.guests.unwrap_or(1),
        event_type: draft.event_type.trim().to_string(),
        special_requests: draft.special_requests.trim().to_string(),
        client_name: draft.client_name.trim().to_string(),
        client_email: draft.client_email.trim().to_string(),
        client_phone: draft.client_phone.trim().to_string(),
        payment_method: draft.payment_method,
        duration_hours: quote.duration_hours,
        total_price: quote.total_price,
    })
}

/// Start/end datetimes of the booked span.
///
/// Hourly single-day bookings use the chosen times; whole-day and event
/// bookings span the event date; multi-day bookings run midnight to midnight.
pub fn combined_datetimes(
    unit: PriceUnit,
    draft: &BookingDraft,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    match draft.booking_type {
        Some(BookingType::Single) => match (unit, draft.event_date) {
            (PriceUnit::Hour, Some(date)) => (
                draft.start_time.map(|t| date.and_time(t)),
                draft.end_time.map(|t| date.and_time(t)),
            ),
            (_, Some(date)) => whole_days(date, date.checked_add_days(Days::new(1))),
            (_, None) => (None, None),
        },
        Some(BookingType::Multi) => match draft.check_in_date {
            Some(check_in) => whole_days(check_in, draft.check_out_date),
            None => (None, draft.check_out_date.map(|d| d.and_time(NaiveTime::MIN))),
        },
        None => (None, None),
    }
}

fn whole_days(
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    (
        Some(start.and_time(NaiveTime::MIN)),
        end.map(|d| d.and_time(NaiveTime::MIN)),
    )
}
