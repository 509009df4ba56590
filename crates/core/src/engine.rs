use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::customer::CustomerId;
use crate::domain::session::{NegotiationSession, NegotiationStage};
use crate::errors::NegotiationError;
use crate::store::SessionStore;
use crate::templates::TemplateBank;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferOutcome {
    Accept,
    Counter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferResponse {
    pub outcome: OfferOutcome,
    pub counter_price: Decimal,
    pub message: String,
    pub stage: NegotiationStage,
}

/// Tiered bargaining policy over one customer's live session.
///
/// Offers close to list price close fast; lowball offers are never
/// flatly rejected, they re-anchor near the floor instead. Every
/// counter price respects `min_acceptable_price`.
#[derive(Clone, Debug)]
pub struct NegotiationEngine {
    default_floor_ratio: Decimal,
}

impl Default for NegotiationEngine {
    fn default() -> Self {
        Self { default_floor_ratio: pct(75) }
    }
}

impl NegotiationEngine {
    pub fn new(default_floor_ratio: Decimal) -> Self {
        Self { default_floor_ratio }
    }

    /// Opens a session for the customer. A live session must be
    /// cancelled explicitly before another can start.
    pub fn start(
        &self,
        store: &SessionStore,
        customer_id: &CustomerId,
        product_label: &str,
        list_price: Decimal,
        floor_ratio: Option<Decimal>,
    ) -> Result<NegotiationSession, NegotiationError> {
        if list_price <= Decimal::ZERO {
            return Err(NegotiationError::InvalidOffer { amount: list_price });
        }
        if let Some(existing) = store.active_session(customer_id) {
            return Err(NegotiationError::SessionAlreadyActive {
                customer_id: customer_id.clone(),
                product_label: existing.product_label,
            });
        }

        let floor_ratio = floor_ratio.unwrap_or(self.default_floor_ratio);
        let session = NegotiationSession::open(product_label, list_price, floor_ratio);
        store.set_session(customer_id, session.clone());
        info!(
            customer = %customer_id,
            product = product_label,
            list_price = %list_price,
            floor = %session.min_acceptable_price,
            "negotiation.started"
        );
        Ok(session)
    }

    /// Consumes one counter-offer and decides accept/counter along with
    /// the stage transition. Acceptance removes the session.
    pub fn submit_offer<R: Rng>(
        &self,
        store: &SessionStore,
        bank: &TemplateBank,
        rng: &mut R,
        customer_id: &CustomerId,
        offer: Decimal,
    ) -> Result<OfferResponse, NegotiationError> {
        if offer <= Decimal::ZERO {
            return Err(NegotiationError::InvalidOffer { amount: offer });
        }
        let mut session = store.active_session(customer_id).ok_or_else(|| {
            NegotiationError::NoActiveSession { customer_id: customer_id.clone() }
        })?;

        session.rounds_elapsed += 1;
        session.offer_history.push(offer);

        let ratio = offer / session.list_price;
        let floor = session.min_acceptable_price;
        // Evaluated top-down, first match wins.
        let (outcome, counter_price, stage) = if ratio >= pct(95) {
            (OfferOutcome::Accept, offer, NegotiationStage::Closing)
        } else if ratio >= pct(90) {
            (
                OfferOutcome::Counter,
                (session.list_price * pct(92)).max(floor),
                NegotiationStage::Closing,
            )
        } else if ratio >= pct(75) {
            let concession = pct(87) - pct(2) * Decimal::from(session.rounds_elapsed);
            let stage = if session.rounds_elapsed >= 3 {
                NegotiationStage::Final
            } else {
                NegotiationStage::Middle
            };
            (OfferOutcome::Counter, (session.list_price * concession).max(floor), stage)
        } else if ratio >= pct(60) {
            (
                OfferOutcome::Counter,
                (session.list_price * pct(82)).max(floor),
                NegotiationStage::Middle,
            )
        } else {
            // Never hard-reject a lowball; re-anchor and hold the stage.
            (
                OfferOutcome::Counter,
                (session.list_price * pct(85)).max(floor),
                session.stage,
            )
        };

        session.stage = stage;
        let message = bank.haggle_phrase(rng, stage, counter_price);

        debug!(
            customer = %customer_id,
            round = session.rounds_elapsed,
            offer = %offer,
            counter = %counter_price,
            stage = ?stage,
            outcome = ?outcome,
            "negotiation.offer_processed"
        );

        match outcome {
            OfferOutcome::Accept => {
                store.clear_session(customer_id);
                info!(customer = %customer_id, price = %counter_price, "negotiation.accepted");
            }
            OfferOutcome::Counter => store.set_session(customer_id, session),
        }

        Ok(OfferResponse { outcome, counter_price, message, stage })
    }

    /// Removes any live session; calling with none active is a no-op.
    pub fn cancel(&self, store: &SessionStore, customer_id: &CustomerId) {
        if store.clear_session(customer_id).is_some() {
            info!(customer = %customer_id, "negotiation.cancelled");
        }
    }
}

fn pct(value: i64) -> Decimal {
    Decimal::new(value, 2)
}
