use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

/// Phase label driving which phrase pool answers the customer.
/// `Closing` is terminal; an accepted offer removes the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStage {
    Opening,
    Middle,
    Final,
    Closing,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationSession {
    pub id: SessionId,
    pub product_label: String,
    pub list_price: Decimal,
    /// Hard lower bound for any counter price, fixed at creation.
    pub min_acceptable_price: Decimal,
    pub rounds_elapsed: u32,
    pub offer_history: Vec<Decimal>,
    pub stage: NegotiationStage,
    pub opened_at: DateTime<Utc>,
}

impl NegotiationSession {
    pub fn open(
        product_label: impl Into<String>,
        list_price: Decimal,
        floor_ratio: Decimal,
    ) -> Self {
        Self {
            id: SessionId(Uuid::new_v4()),
            product_label: product_label.into(),
            min_acceptable_price: list_price * floor_ratio,
            list_price,
            rounds_elapsed: 0,
            offer_history: Vec::new(),
            stage: NegotiationStage::Opening,
            opened_at: Utc::now(),
        }
    }
}
