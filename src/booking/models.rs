//! Domain models for spaces and booking drafts.
//!
//! Space records come from the backend's space-detail endpoint and are
//! read-only here. A `BookingDraft` is the form state of the booking wizard;
//! its serde shape matches what the browser posts (camelCase keys, blank
//! strings for untouched inputs).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit a space's price is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Hour,
    Day,
    Event,
}

impl PriceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceUnit::Hour => "hour",
            PriceUnit::Day => "day",
            PriceUnit::Event => "event",
        }
    }
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price of a space. `amount` accepts a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacePrice {
    pub amount: Decimal,
    pub unit: PriceUnit,
}

/// Space record from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i32>,
    pub price: SpacePrice,
}

/// Single-day (hourly/daily/event) or multi-day booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Single,
    Multi,
}

impl FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(BookingType::Single),
            "multi" => Ok(BookingType::Multi),
            other => Err(format!("unknown booking type '{}'", other)),
        }
    }
}

/// Payment method. Only cash is offered at the moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
}

/// In-progress booking as entered in the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    #[serde(deserialize_with = "form::parsed")]
    pub booking_type: Option<BookingType>,

    // Single-day fields
    #[serde(deserialize_with = "form::parsed")]
    pub event_date: Option<NaiveDate>,
    #[serde(deserialize_with = "form::time")]
    pub start_time: Option<NaiveTime>,
    #[serde(deserialize_with = "form::time")]
    pub end_time: Option<NaiveTime>,

    // Multi-day fields
    #[serde(deserialize_with = "form::parsed")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(deserialize_with = "form::parsed")]
    pub check_out_date: Option<NaiveDate>,

    #[serde(deserialize_with = "form::integer")]
    pub guests: Option<i32>,
    pub event_type: String,
    pub special_requests: String,

    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,

    pub payment_method: PaymentMethod,
}

impl BookingDraft {
    pub fn is_single(&self) -> bool {
        self.booking_type == Some(BookingType::Single)
    }

    pub fn is_multi(&self) -> bool {
        self.booking_type == Some(BookingType::Multi)
    }
}

/// Deserializers for HTML form values, where an untouched input posts "".
mod form {
    use std::fmt::Display;
    use std::str::FromStr;

    use chrono::NaiveTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        Text(String),
        Integer(i64),
    }

    fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        blank_as_none(deserializer)?
            .map(|s| s.parse::<T>().map_err(D::Error::custom))
            .transpose()
    }

    /// Accepts `HH:MM` (what `<input type="time">` sends) and `HH:MM:SS`.
    pub fn time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        blank_as_none(deserializer)?
            .map(|s| {
                NaiveTime::parse_from_str(&s, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
                    .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", s, e)))
            })
            .transpose()
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Value::Integer(n)) => i32::try_from(n).map(Some).map_err(D::Error::custom),
            Some(Value::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    Ok(None)
                } else {
                    s.parse::<i32>().map(Some).map_err(D::Error::custom)
                }
            }
        }
    }
}
