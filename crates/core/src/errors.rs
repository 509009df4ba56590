use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::customer::CustomerId;

/// Recoverable negotiation conditions surfaced to the caller as typed
/// results, never as aborts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("no active negotiation session for customer {customer_id}")]
    NoActiveSession { customer_id: CustomerId },
    #[error("offer amount must be positive, got {amount}")]
    InvalidOffer { amount: Decimal },
    #[error(
        "customer {customer_id} already negotiating for `{product_label}`; cancel it first"
    )]
    SessionAlreadyActive { customer_id: CustomerId, product_label: String },
}
