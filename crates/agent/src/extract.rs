use rust_decimal::Decimal;

/// Replaceable price-token strategy so stricter or locale-aware parsers
/// can slot in without touching the negotiation engine.
pub trait PriceExtractor: Send + Sync {
    /// First amount-like substring of the text, or `None`. Extraction
    /// failure is "no offer found", never an error.
    fn extract(&self, text: &str) -> Option<Decimal>;
}

/// Default heuristic parser for naira amounts as customers type them:
/// optional `₦`/`ngn` prefix, comma thousands grouping, `k`/`m`
/// suffixes and the spelled-out `thousand`/`million` multiplier words.
#[derive(Clone, Copy, Debug, Default)]
pub struct NairaPriceExtractor;

impl PriceExtractor for NairaPriceExtractor {
    fn extract(&self, text: &str) -> Option<Decimal> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        for (index, raw_token) in tokens.iter().enumerate() {
            let token = raw_token
                .trim_start_matches('₦')
                .trim_start_matches("ngn")
                .trim_end_matches(['.', ',', '!', '?', ')'])
                .trim_start_matches(['(', '"']);
            if token.is_empty() {
                continue;
            }
            let Some((amount, had_suffix)) = parse_amount_token(token) else {
                continue;
            };
            // A multiplier word only applies to a bare number; "45k
            // thousand" would otherwise double up.
            let multiplier = match tokens.get(index + 1) {
                _ if had_suffix => 1,
                Some(&"thousand") | Some(&"thousands") => 1_000,
                Some(&"million") => 1_000_000,
                _ => 1,
            };
            return Some(amount * Decimal::from(multiplier));
        }
        None
    }
}

fn parse_amount_token(token: &str) -> Option<(Decimal, bool)> {
    let (digits, multiplier) = if let Some(prefix) = token.strip_suffix('k') {
        (prefix, 1_000)
    } else if let Some(prefix) = token.strip_suffix('m') {
        (prefix, 1_000_000)
    } else {
        (token, 1)
    };

    if !digits.chars().next()?.is_ascii_digit() {
        return None;
    }
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let amount: Decimal = cleaned.parse().ok()?;
    Some((amount * Decimal::from(multiplier), multiplier != 1))
}

const NEGOTIATION_MARKERS: [&str; 9] = [
    "price", "cost", "how much", "naira", "₦", "last price", "discount", "lower", "reduce",
];

/// Keyword scan for bargaining intent in a message with no parseable
/// amount yet.
pub fn contains_negotiation_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NEGOTIATION_MARKERS.iter().any(|marker| lowered.contains(marker))
}
