//! Core booking price/duration calculation.
//!
//! Pure functions - no I/O, no state. The quote is recomputed from the draft
//! on every change; incomplete or inconsistent input yields an empty quote
//! (`{0, 0}`) instead of an error so the UI can show a placeholder.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::models::{BookingDraft, BookingType, PriceUnit, SpacePrice};

pub const HOURS_PER_DAY: i64 = 24;

const SECONDS_PER_HOUR: i64 = 60 * 60;
const SECONDS_PER_DAY: i64 = HOURS_PER_DAY * SECONDS_PER_HOUR;

/// Billing duration and total price for a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub duration_hours: Decimal,
    pub total_price: Decimal,
}

impl Quote {
    /// "Not enough information yet"
    pub const EMPTY: Quote = Quote {
        duration_hours: Decimal::ZERO,
        total_price: Decimal::ZERO,
    };

    pub fn is_empty(&self) -> bool {
        self.duration_hours.is_zero() && self.total_price.is_zero()
    }

    fn flat(amount: Decimal) -> Self {
        Quote {
            duration_hours: Decimal::from(HOURS_PER_DAY),
            total_price: amount,
        }
    }
}

/// Round an hour count for display using banker's rounding.
///
/// Billing never uses the rounded value; it bills `ceil` of the raw span.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use venue_booking_web::booking::round_hours;
///
/// assert_eq!(round_hours(dec!(2.5)), dec!(2.5));
/// assert_eq!(round_hours(dec!(0.3333333)), dec!(0.33));
/// assert_eq!(round_hours(dec!(0.125)), dec!(0.12)); // rounds to even
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .normalize()
}

/// Compute the quote for a draft against a space's price.
///
/// Single-day:
/// * `hour` - needs event date, start and end time; bills `ceil(hours)`
/// * `day` - needs event date; flat amount, 24h duration
/// * `event` - no date needed; flat amount, 24h duration
///
/// Multi-day needs check-in strictly before check-out; bills per night
/// (`amount * 24` per night for hourly spaces).
///
/// A total that overflows `Decimal` also yields the empty quote.
pub fn calculate_quote(price: &SpacePrice, draft: &BookingDraft) -> Quote {
    match draft.booking_type {
        Some(BookingType::Single) => single_day_quote(price, draft),
        Some(BookingType::Multi) => multi_day_quote(price, draft),
        None => Quote::EMPTY,
    }
}

fn single_day_quote(price: &SpacePrice, draft: &BookingDraft) -> Quote {
    match price.unit {
        PriceUnit::Hour => {
            let (Some(_), Some(start), Some(end)) =
                (draft.event_date, draft.start_time, draft.end_time)
            else {
                return Quote::EMPTY;
            };

            let hours = elapsed_hours(start, end);
            if hours.is_zero() {
                return Quote::EMPTY;
            }

            match price.amount.checked_mul(hours.ceil()) {
                Some(total_price) => Quote {
                    duration_hours: hours,
                    total_price,
                },
                None => Quote::EMPTY,
            }
        }
        PriceUnit::Day => match draft.event_date {
            Some(_) => Quote::flat(price.amount),
            None => Quote::EMPTY,
        },
        PriceUnit::Event => Quote::flat(price.amount),
    }
}

fn multi_day_quote(price: &SpacePrice, draft: &BookingDraft) -> Quote {
    let (Some(check_in), Some(check_out)) = (draft.check_in_date, draft.check_out_date) else {
        return Quote::EMPTY;
    };

    let nights = nights_between(check_in, check_out);
    if nights <= 0 {
        return Quote::EMPTY;
    }

    let nightly_rate = match price.unit {
        PriceUnit::Day | PriceUnit::Event => Some(price.amount),
        PriceUnit::Hour => price.amount.checked_mul(Decimal::from(HOURS_PER_DAY)),
    };

    match nightly_rate.and_then(|rate| rate.checked_mul(Decimal::from(nights))) {
        Some(total_price) => Quote {
            duration_hours: Decimal::from(nights * HOURS_PER_DAY),
            total_price,
        },
        None => Quote::EMPTY,
    }
}

/// Hours from `start` to `end` on the same day, floored at zero.
pub fn elapsed_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    let seconds = (end - start).num_seconds().max(0);
    (Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)).normalize()
}

/// Nights between two dates, rounded up. Zero or negative spans return 0.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (Decimal::from(seconds) / Decimal::from(SECONDS_PER_DAY))
        .ceil()
        .to_i64()
        .unwrap_or(0)
}
