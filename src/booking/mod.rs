//! Booking engine module.
//!
//! Price/duration quotes, per-step validation and the booking wizard state
//! machine, plus the JSON routes that expose them to the browser.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod submission;
pub mod validation;
pub mod wizard;

// Re-export commonly used items
pub use calculators::{calculate_quote, round_hours, Quote};
pub use models::{BookingDraft, BookingType, PriceUnit, Space, SpacePrice};
pub use routes::router;
pub use validation::{validate_step, Field, FieldErrors, WizardStep};
pub use wizard::BookingWizard;
