//! Payment domain module.
//!
//! Value objects for creating payment intents.
//!
//! # Module Structure
//!
//! - `request` - PaymentRequest and PaymentIntentResult
//! - `method_options` - Per-method option blocks (ACSS debit mandate terms)
//! - `errors` - PaymentError and its categories

mod errors;
mod method_options;
mod request;

pub use errors::{PaymentError, PaymentErrorKind};
pub use method_options::{
    AcssDebitOptions, MandateOptions, PaymentMethodOptions, PaymentSchedule, TransactionType,
};
pub use request::{PaymentIntentResult, PaymentRequest};
