//! Spoken-token parsing for voice input.
//!
//! Audio capture and recognition live outside the core; this module only
//! maps recognized tokens to outcomes. Every token either resolves to a
//! valid outcome for the variant or is discarded silently — unrecognized
//! speech never produces an input.

use crate::outcome::{DOUBLE_ZERO, TableVariant};

/// Map one spoken token to an outcome. Handles digit strings, number words
/// up to nine (with the common recognizer homophones "for" and "ate"), and
/// "double …" forms for the American double zero.
pub fn parse_spoken_token(word: &str, variant: TableVariant) -> Option<u8> {
    let word = word.trim().to_lowercase();
    if word == "zero" || word == "0" {
        return Some(0);
    }
    if variant == TableVariant::American && word.contains("double") {
        return Some(DOUBLE_ZERO);
    }
    let small = match word.as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" | "for" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" | "ate" => Some(8),
        "nine" => Some(9),
        _ => None,
    };
    if small.is_some() {
        return small;
    }
    match word.parse::<u8>() {
        Ok(n) if (1..=36).contains(&n) => Some(n),
        _ => None,
    }
}

/// Parse a whole transcript, keeping recognized tokens in order.
pub fn parse_transcript(text: &str, variant: TableVariant) -> Vec<u8> {
    text.split_whitespace()
        .filter_map(|w| parse_spoken_token(w, variant))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_forms() {
        assert_eq!(parse_spoken_token("zero", TableVariant::European), Some(0));
        assert_eq!(parse_spoken_token("0", TableVariant::European), Some(0));
    }

    #[test]
    fn test_double_zero_only_on_american() {
        assert_eq!(
            parse_spoken_token("double", TableVariant::American),
            Some(DOUBLE_ZERO)
        );
        assert_eq!(
            parse_spoken_token("double-zero", TableVariant::American),
            Some(DOUBLE_ZERO)
        );
        assert_eq!(parse_spoken_token("double", TableVariant::European), None);
    }

    #[test]
    fn test_number_words_and_homophones() {
        assert_eq!(parse_spoken_token("seven", TableVariant::European), Some(7));
        assert_eq!(parse_spoken_token("for", TableVariant::European), Some(4));
        assert_eq!(parse_spoken_token("ate", TableVariant::European), Some(8));
        assert_eq!(parse_spoken_token("NINE", TableVariant::European), Some(9));
    }

    #[test]
    fn test_digit_strings() {
        assert_eq!(parse_spoken_token("17", TableVariant::European), Some(17));
        assert_eq!(parse_spoken_token("36", TableVariant::European), Some(36));
        assert_eq!(parse_spoken_token("37", TableVariant::European), None);
        assert_eq!(parse_spoken_token("37", TableVariant::American), None);
    }

    #[test]
    fn test_unrecognized_tokens_are_discarded() {
        assert_eq!(parse_spoken_token("banana", TableVariant::European), None);
        assert_eq!(parse_spoken_token("", TableVariant::European), None);
        assert_eq!(parse_spoken_token("-3", TableVariant::European), None);
    }

    #[test]
    fn test_transcript_keeps_order_and_drops_noise() {
        let got = parse_transcript("uh seven then 19 maybe zero", TableVariant::European);
        assert_eq!(got, vec![7, 19, 0]);
    }
}
