use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::LanguageRegister;
use crate::domain::session::NegotiationStage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// [0,12) morning, [12,17) afternoon, [17,24) evening. Hours past 23
    /// collapse into evening rather than panicking on a bad clock.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Fashion,
    Home,
}

/// Declaration order is the tie-break: the first category whose keyword
/// list matches wins, so detection stays deterministic.
const CATEGORY_KEYWORDS: [(ProductCategory, &[&str]); 3] = [
    (
        ProductCategory::Electronics,
        &["phone", "laptop", "computer", "tablet", "headphones", "speaker", "tv", "camera", "charger", "gadget"],
    ),
    (
        ProductCategory::Fashion,
        &["dress", "shirt", "trouser", "shoe", "bag", "wristwatch", "jewelry", "clothes", "fashion", "style"],
    ),
    (
        ProductCategory::Home,
        &["furniture", "kitchen", "decor", "appliance", "bed", "chair", "table", "fridge", "cooker"],
    ),
];

pub fn detect_category(text: &str) -> Option<ProductCategory> {
    let lowered = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(category, _)| *category)
}

const GREETINGS_INFORMAL_MORNING: &[&str] = &[
    "Good morning o, {name}! How you dey today? Wetin you wan buy?",
    "Morning my customer! You come early today o. Make we find better thing for you.",
    "Eh, good morning {name}! Welcome back. Wetin we fit do for you this morning?",
];

const GREETINGS_INFORMAL_AFTERNOON: &[&str] = &[
    "Good afternoon {name}! You dey try well well to reach us today. Wetin you need?",
    "Afternoon o! Hope say the day dey treat you fine? Make we find wetin you want.",
    "Welcome {name}! Good afternoon. Come make we see wetin we fit do for you.",
];

const GREETINGS_INFORMAL_EVENING: &[&str] = &[
    "Good evening {name}! You still dey hustle o. Wetin bring you come this evening?",
    "Evening my person! Hope your day go well? Make we do quick business before night.",
    "Good evening o! Even for this hour you still dey find quality things. I respect you!",
];

const GREETINGS_STANDARD_MORNING: &[&str] = &[
    "Good morning, {name}! How can I help you find what you're looking for today?",
    "Morning! Thank you for stopping by. What products are you interested in?",
    "Good morning! I hope you're doing well. What brings you to the market today?",
];

const GREETINGS_STANDARD_AFTERNOON: &[&str] = &[
    "Good afternoon, {name}! What can I help you with today?",
    "Afternoon! Thank you for visiting. How may I assist you?",
    "Good afternoon! I'm here to help you find exactly what you need.",
];

const GREETINGS_STANDARD_EVENING: &[&str] = &[
    "Good evening, {name}! Thank you for reaching out this late. How can I help?",
    "Evening! I appreciate the visit. What can I show you?",
    "Good evening! What are you shopping for this evening?",
];

const ACKS_ELECTRONICS: &[&str] = &[
    "Tech lover! You don come to the right place — we get the latest gadgets wey dey trend now.",
    "From phones to laptops, everything here na original with warranty. Which one you dey eye?",
    "Quality electronics at competitive prices, that's our specialty. What exactly do you need?",
];

const ACKS_FASHION: &[&str] = &[
    "Fashion forward! We get the latest styles wey go make you shine.",
    "From casual to corporate wear, we have everything to upgrade your wardrobe.",
    "Quality materials, trendy designs, friendly prices. What piece are you after?",
];

const ACKS_HOME: &[&str] = &[
    "Make your house beautiful — quality furniture and appliances dey here.",
    "From cookware to furniture, we have everything to make your home complete.",
    "Time to transform your space! Tell me the room and I go show you options.",
];

const HAGGLE_OPENING: &[&str] = &[
    "Ah, you get eye for good things o! This one na original, quality guarantee. Make we start from {price}.",
    "You choose correct thing, my friend! Premium quality wey go last. I fit arrange am for {price}.",
    "This na quality goods wey everybody dey find. Since you come personally, {price} for you.",
];

const HAGGLE_MIDDLE: &[&str] = &[
    "Eh, you dey try sha! But consider the quality — make we meet at {price}.",
    "I see say you sabi market! Okay, I fit come down small. {price}, and that's because of you.",
    "You get good negotiation skill o! Let me check... I fit do {price}, but quality must reflect for price.",
];

const HAGGLE_FINAL: &[&str] = &[
    "Okay, you don win! {price} na my final price — I no fit go below this one again. Na real talk!",
    "My friend, you tough o! {price} na special rate, I no dey give everybody this one.",
    "Chai, you don negotiate well well! {price} final. Other people dey pay more than this!",
];

const HAGGLE_CLOSING: &[&str] = &[
    "Deal! {price} and we close am. You get good eye for quality!",
    "Almost there — make we say {price} and seal this deal now now!",
    "{price} and the thing na your own. Na below market price already o!",
];

const INVITES_INFORMAL: &[&str] = &[
    "You wan talk price? No wahala! Tell me which product you dey eye and I go give you my best rate.",
    "Price talk na my specialty o! Which item you want make we negotiate on top?",
];

const INVITES_STANDARD: &[&str] = &[
    "Happy to talk prices! Tell me which product you have in mind and I'll quote you my best rate.",
    "Let's find you a good deal. Which item would you like to negotiate on?",
];

const FALLBACKS_INFORMAL: &[&str] = &[
    "I hear you, {name}! Make we yarn am well — wetin exactly you wan buy? I go help you get the best deal.",
    "Thanks for your message, {name}! I be your market specialist. Wetin you dey look for?",
];

const FALLBACKS_STANDARD: &[&str] = &[
    "Thank you, {name}! I'm your personal shopping assistant — what are you looking for today?",
    "I understand, {name}. Tell me the product or service you're interested in and we'll take it from there.",
];

const HELP_INFORMAL: &str = "I dey here to help you, {name}! You fit find any product, price am down through negotiation, or ask for shopping advice. Wetin you need?";

const HELP_STANDARD: &str = "I'm here to help, {name}! I can find products, negotiate the best price with you, and offer shopping guidance. What do you need?";

const ORDER_PROMPT_INFORMAL: &str = "Deal don close! Make I help you place the order now?";

const ORDER_PROMPT_STANDARD: &str = "Deal closed! Shall I help you place the order now?";

/// Static categorized pools of reply candidates. Category selection is
/// deterministic; the pick within a pool is uniform over the
/// caller-supplied random source so tests can seed it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateBank;

impl TemplateBank {
    pub fn greeting<R: Rng>(
        &self,
        rng: &mut R,
        register: LanguageRegister,
        time_of_day: TimeOfDay,
        display_name: &str,
    ) -> String {
        let pool = match (register, time_of_day) {
            (LanguageRegister::Informal, TimeOfDay::Morning) => GREETINGS_INFORMAL_MORNING,
            (LanguageRegister::Informal, TimeOfDay::Afternoon) => GREETINGS_INFORMAL_AFTERNOON,
            (LanguageRegister::Informal, TimeOfDay::Evening) => GREETINGS_INFORMAL_EVENING,
            (LanguageRegister::Standard, TimeOfDay::Morning) => GREETINGS_STANDARD_MORNING,
            (LanguageRegister::Standard, TimeOfDay::Afternoon) => GREETINGS_STANDARD_AFTERNOON,
            (LanguageRegister::Standard, TimeOfDay::Evening) => GREETINGS_STANDARD_EVENING,
        };
        fill_name(pick(rng, pool), display_name)
    }

    pub fn category_ack<R: Rng>(&self, rng: &mut R, category: ProductCategory) -> String {
        let pool = match category {
            ProductCategory::Electronics => ACKS_ELECTRONICS,
            ProductCategory::Fashion => ACKS_FASHION,
            ProductCategory::Home => ACKS_HOME,
        };
        pick(rng, pool).to_owned()
    }

    pub fn haggle_phrase<R: Rng>(
        &self,
        rng: &mut R,
        stage: NegotiationStage,
        counter_price: Decimal,
    ) -> String {
        let pool = match stage {
            NegotiationStage::Opening => HAGGLE_OPENING,
            NegotiationStage::Middle => HAGGLE_MIDDLE,
            NegotiationStage::Final => HAGGLE_FINAL,
            NegotiationStage::Closing => HAGGLE_CLOSING,
        };
        pick(rng, pool).replace("{price}", &format_naira(counter_price))
    }

    pub fn negotiation_invite<R: Rng>(&self, rng: &mut R, register: LanguageRegister) -> String {
        let pool = match register {
            LanguageRegister::Informal => INVITES_INFORMAL,
            LanguageRegister::Standard => INVITES_STANDARD,
        };
        pick(rng, pool).to_owned()
    }

    pub fn fallback<R: Rng>(
        &self,
        rng: &mut R,
        register: LanguageRegister,
        display_name: &str,
    ) -> String {
        let pool = match register {
            LanguageRegister::Informal => FALLBACKS_INFORMAL,
            LanguageRegister::Standard => FALLBACKS_STANDARD,
        };
        fill_name(pick(rng, pool), display_name)
    }

    pub fn help_response(&self, register: LanguageRegister, display_name: &str) -> String {
        let template = match register {
            LanguageRegister::Informal => HELP_INFORMAL,
            LanguageRegister::Standard => HELP_STANDARD,
        };
        fill_name(template, display_name)
    }

    pub fn order_prompt(&self, register: LanguageRegister) -> &'static str {
        match register {
            LanguageRegister::Informal => ORDER_PROMPT_INFORMAL,
            LanguageRegister::Standard => ORDER_PROMPT_STANDARD,
        }
    }
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn fill_name(template: &str, display_name: &str) -> String {
    let name = if display_name.trim().is_empty() { "my friend" } else { display_name };
    template.replace("{name}", name)
}

/// Whole-naira rendering with thousands grouping, e.g. `₦83,000`.
pub fn format_naira(amount: Decimal) -> String {
    let whole = amount.round().trunc().to_string();
    let digits = whole.trim_start_matches('-');
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if whole.starts_with('-') {
        format!("-₦{grouped}")
    } else {
        format!("₦{grouped}")
    }
}
