//! Fixed per-payment-method options attached to new payment intents.
//!
//! Options are looked up by payment method type in a static table. Adding a
//! method means adding a builder entry, not a new branch at the call site.

/// Options block for one payment method type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodOptions {
    /// Pre-authorized debit in Canada.
    AcssDebit(AcssDebitOptions),
}

/// ACSS debit options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcssDebitOptions {
    pub mandate_options: MandateOptions,
}

/// Mandate terms describing the nature of a bank-debit authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandateOptions {
    pub payment_schedule: PaymentSchedule,
    pub transaction_type: TransactionType,
}

/// When debits occur under the mandate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentSchedule {
    Interval,
    Sporadic,
    Combined,
}

impl PaymentSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentSchedule::Interval => "interval",
            PaymentSchedule::Sporadic => "sporadic",
            PaymentSchedule::Combined => "combined",
        }
    }
}

/// Whether the debited account is personal or business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Personal,
    Business,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Personal => "personal",
            TransactionType::Business => "business",
        }
    }
}

type OptionsBuilder = fn() -> PaymentMethodOptions;

/// Payment method types that require an options block, with their builders.
const OPTION_BUILDERS: &[(&str, OptionsBuilder)] = &[("acss_debit", acss_debit_options)];

fn acss_debit_options() -> PaymentMethodOptions {
    PaymentMethodOptions::AcssDebit(AcssDebitOptions {
        mandate_options: MandateOptions {
            payment_schedule: PaymentSchedule::Sporadic,
            transaction_type: TransactionType::Personal,
        },
    })
}

impl PaymentMethodOptions {
    /// Options required for `payment_method_type`, or `None` when the method
    /// needs no extra configuration.
    pub fn for_method(payment_method_type: &str) -> Option<Self> {
        OPTION_BUILDERS
            .iter()
            .find(|(method, _)| *method == payment_method_type)
            .map(|(_, build)| build())
    }

    /// The payment method type these options belong to.
    pub fn method(&self) -> &'static str {
        match self {
            PaymentMethodOptions::AcssDebit(_) => "acss_debit",
        }
    }
}
