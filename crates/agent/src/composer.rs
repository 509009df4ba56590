use std::sync::{Arc, Mutex};

use chrono::{Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use palaver_core::classify::classify_register;
use palaver_core::templates::detect_category;
use palaver_core::{
    CoreConfig, CustomerId, CustomerProfile, LanguageRegister, NegotiationEngine,
    NegotiationSession, NegotiationStage, OfferOutcome, SessionStore, TemplateBank, TimeOfDay,
};

use crate::extract::{contains_negotiation_marker, NairaPriceExtractor, PriceExtractor};

/// Wall-clock hour supplier for time-of-day greeting selection.
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Pins the hour so greeting selection is deterministic in tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedHourClock(pub u32);

impl Clock for FixedHourClock {
    fn current_hour(&self) -> u32 {
        self.0
    }
}

/// Product and price context supplied by the caller's catalog lookup
/// when a negotiation may start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContext {
    pub label: String,
    pub list_price: Decimal,
    pub floor_ratio: Option<Decimal>,
}

/// Turns one inbound message plus session state into one outbound
/// message, updating the store as a side effect.
///
/// Strictly an orchestrator: register classification, price extraction
/// and template selection feed the deterministic negotiation core,
/// which alone decides prices and stage transitions.
pub struct ResponseComposer<X = NairaPriceExtractor, C = SystemClock> {
    store: Arc<SessionStore>,
    bank: TemplateBank,
    engine: NegotiationEngine,
    extractor: X,
    clock: C,
    rng: Mutex<StdRng>,
}

impl ResponseComposer {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self::with_parts(
            store,
            NairaPriceExtractor,
            SystemClock,
            StdRng::from_entropy(),
            &CoreConfig::default(),
        )
    }
}

impl<X, C> ResponseComposer<X, C>
where
    X: PriceExtractor,
    C: Clock,
{
    pub fn with_parts(
        store: Arc<SessionStore>,
        extractor: X,
        clock: C,
        rng: StdRng,
        config: &CoreConfig,
    ) -> Self {
        Self {
            store,
            bank: TemplateBank,
            engine: NegotiationEngine::new(config.default_floor_ratio),
            extractor,
            clock,
            rng: Mutex::new(rng),
        }
    }

    /// Processes one customer message to completion and returns the
    /// reply text for the caller's delivery layer. Messages for the
    /// same customer are serialized; different customers do not
    /// contend.
    pub fn handle_message(
        &self,
        customer_id: &CustomerId,
        text: &str,
        display_name: &str,
        product: Option<&ProductContext>,
    ) -> String {
        let customer_lock = self.store.customer_lock(customer_id);
        let _serialized = match customer_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        self.store.get_or_create_profile(customer_id, display_name);
        let register = classify_register(text);
        self.store.with_profile_mut(customer_id, |profile| {
            profile.last_seen_at = Utc::now();
            profile.interaction_count += 1;
            profile.register = register;
        });

        let amount = self.extractor.extract(text);
        let outbound = match (self.store.active_session(customer_id), amount) {
            (Some(_), Some(offer)) => {
                self.respond_to_offer(customer_id, offer, register, display_name)
            }
            (None, Some(offer)) => {
                self.open_negotiation(customer_id, product, Some(offer), register, display_name)
            }
            (None, None) if contains_negotiation_marker(text) => {
                self.open_negotiation(customer_id, product, None, register, display_name)
            }
            _ => self.templated_response(text, register, display_name),
        };

        self.store.append_history(customer_id, format!("Customer: {text}"));
        self.store.append_history(customer_id, format!("Assistant: {outbound}"));
        debug!(customer = %customer_id, register = ?register, "composer.message_handled");
        outbound
    }

    /// Removes any active negotiation for the customer; idempotent.
    pub fn cancel_negotiation(&self, customer_id: &CustomerId) {
        self.engine.cancel(&self.store, customer_id);
    }

    pub fn profile(&self, customer_id: &CustomerId) -> Option<CustomerProfile> {
        self.store.profile(customer_id)
    }

    pub fn history(&self, customer_id: &CustomerId) -> Vec<String> {
        self.store.history(customer_id)
    }

    pub fn active_session(&self, customer_id: &CustomerId) -> Option<NegotiationSession> {
        self.store.active_session(customer_id)
    }

    pub fn expire_sessions_older_than(&self, max_age: chrono::Duration) -> usize {
        self.store.expire_sessions_older_than(max_age)
    }

    fn respond_to_offer(
        &self,
        customer_id: &CustomerId,
        offer: Decimal,
        register: LanguageRegister,
        display_name: &str,
    ) -> String {
        let mut rng = self.lock_rng();
        match self.engine.submit_offer(&self.store, &self.bank, &mut *rng, customer_id, offer) {
            Ok(response) if response.outcome == OfferOutcome::Accept => {
                format!("{}\n\n{}", response.message, self.bank.order_prompt(register))
            }
            Ok(response) => response.message,
            Err(error) => {
                warn!(customer = %customer_id, %error, "composer.offer_rejected");
                self.bank.fallback(&mut *rng, register, display_name)
            }
        }
    }

    fn open_negotiation(
        &self,
        customer_id: &CustomerId,
        product: Option<&ProductContext>,
        offer: Option<Decimal>,
        register: LanguageRegister,
        display_name: &str,
    ) -> String {
        let Some(context) = product else {
            // Bargaining intent with no catalog context: invite the
            // customer to name a product instead of failing.
            return self.bank.negotiation_invite(&mut *self.lock_rng(), register);
        };

        let started = self.engine.start(
            &self.store,
            customer_id,
            &context.label,
            context.list_price,
            context.floor_ratio,
        );
        match started {
            Ok(session) => match offer {
                Some(offer) => self.respond_to_offer(customer_id, offer, register, display_name),
                None => self.bank.haggle_phrase(
                    &mut *self.lock_rng(),
                    NegotiationStage::Opening,
                    session.list_price,
                ),
            },
            Err(error) => {
                warn!(customer = %customer_id, %error, "composer.start_rejected");
                self.bank.fallback(&mut *self.lock_rng(), register, display_name)
            }
        }
    }

    fn templated_response(
        &self,
        text: &str,
        register: LanguageRegister,
        display_name: &str,
    ) -> String {
        let mut rng = self.lock_rng();
        if is_greeting(text) {
            let time_of_day = TimeOfDay::from_hour(self.clock.current_hour());
            self.bank.greeting(&mut *rng, register, time_of_day, display_name)
        } else if let Some(category) = detect_category(text) {
            self.bank.category_ack(&mut *rng, category)
        } else if is_help_request(text) {
            self.bank.help_response(register, display_name)
        } else {
            self.bank.fallback(&mut *rng, register, display_name)
        }
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

const GREETING_PHRASES: [&str; 5] =
    ["good morning", "good afternoon", "good evening", "how far", "good day"];

const GREETING_WORDS: [&str; 4] = ["hello", "hi", "hey", "morning"];

fn is_greeting(text: &str) -> bool {
    let lowered = text.to_lowercase();
    GREETING_PHRASES.iter().any(|phrase| lowered.contains(phrase))
        || GREETING_WORDS.iter().any(|word| {
            lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *word)
        })
}

fn is_help_request(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("help") || lowered.contains("assist")
}
