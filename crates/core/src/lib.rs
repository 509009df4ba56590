pub mod classify;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod store;
pub mod templates;

pub use classify::classify_register;
pub use config::{ConfigError, CoreConfig};
pub use domain::customer::{CustomerId, CustomerProfile, LanguageRegister};
pub use domain::session::{NegotiationSession, NegotiationStage, SessionId};
pub use engine::{NegotiationEngine, OfferOutcome, OfferResponse};
pub use errors::NegotiationError;
pub use store::{SessionStore, DEFAULT_HISTORY_CAP};
pub use templates::{detect_category, format_naira, ProductCategory, TemplateBank, TimeOfDay};
