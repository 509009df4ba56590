use crate::domain::customer::LanguageRegister;

/// Short vernacular function-words that mark informal West African
/// market register. Matched as whole words only; common English words
/// like "no" or "go" are deliberately absent.
const REGISTER_MARKERS: [&str; 12] = [
    "dey", "wetin", "wan", "fit", "sha", "abi", "abeg", "wey", "na", "oya", "sef", "dem",
];

/// Labels a single message as informal or standard register.
///
/// Pure and case-insensitive: two or more distinct marker words present
/// as whole words yield `Informal`, anything else (including empty
/// input) yields `Standard`.
pub fn classify_register(text: &str) -> LanguageRegister {
    let lowered = text.to_lowercase();
    let distinct_markers = REGISTER_MARKERS
        .iter()
        .filter(|marker| {
            lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == **marker)
        })
        .count();

    if distinct_markers >= 2 {
        LanguageRegister::Informal
    } else {
        LanguageRegister::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::classify_register;
    use crate::domain::customer::LanguageRegister;

    #[test]
    fn pidgin_phrase_with_two_markers_is_informal() {
        assert_eq!(
            classify_register("I wan buy this one sha, abeg"),
            LanguageRegister::Informal
        );
    }

    #[test]
    fn plain_english_is_standard() {
        assert_eq!(
            classify_register("Good morning, I would like to buy sneakers"),
            LanguageRegister::Standard
        );
    }

    #[test]
    fn empty_input_is_standard() {
        assert_eq!(classify_register(""), LanguageRegister::Standard);
    }

    #[test]
    fn single_marker_is_not_enough() {
        assert_eq!(classify_register("wetin is the price?"), LanguageRegister::Standard);
    }

    #[test]
    fn repeated_marker_counts_once() {
        assert_eq!(classify_register("abeg abeg abeg"), LanguageRegister::Standard);
    }

    #[test]
    fn markers_match_whole_words_only() {
        // "sharp" contains "sha" and "deny" contains "dey" as substrings.
        assert_eq!(classify_register("sharp deny"), LanguageRegister::Standard);
    }

    #[test]
    fn classification_is_case_insensitive_and_deterministic() {
        let first = classify_register("ABEG make we talk, WETIN you get?");
        let second = classify_register("abeg make we talk, wetin you get?");
        assert_eq!(first, second);
        assert_eq!(first, LanguageRegister::Informal);
    }
}
