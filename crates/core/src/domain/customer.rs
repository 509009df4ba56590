use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable customer identifier, typically a phone number.
/// Primary key for every per-customer aggregate; the core does not
/// validate its shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageRegister {
    Informal,
    #[default]
    Standard,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub display_name: String,
    pub register: LanguageRegister,
    pub interaction_count: u64,
    pub last_seen_at: DateTime<Utc>,
}

impl CustomerProfile {
    pub fn new(customer_id: CustomerId, display_name: impl Into<String>) -> Self {
        Self {
            customer_id,
            display_name: display_name.into(),
            register: LanguageRegister::Standard,
            interaction_count: 0,
            last_seen_at: Utc::now(),
        }
    }
}
