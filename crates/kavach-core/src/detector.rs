//! Value classifiers: strict shape predicates over a single field value.

// Static patterns are literals and always compile
#![allow(clippy::expect_used)]

use crate::policy::{AddressHeuristic, DetectionPolicy};
use crate::types::FieldKind;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use zeroize::Zeroizing;

static PASSPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]\d{7,8}$").expect("static regex: passport pattern")
});

static UPI_USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]{2,}$").expect("static regex: UPI user pattern")
});

static POSTAL_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{6}\b").expect("static regex: PIN code pattern"));

static DIGIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("static regex: decimal digit"));

/// Decimal digits of `value` in any script, scrubbed from memory when dropped
pub(crate) fn digits_of(value: &str) -> Zeroizing<String> {
    Zeroizing::new(DIGIT_REGEX.find_iter(value).map(|m| m.as_str()).collect())
}

/// Exactly 10 digits once separators and prefixes are stripped
pub fn is_phone(value: &str) -> bool {
    digits_of(value).chars().count() == 10
}

pub fn is_national_id(value: &str) -> bool {
    digits_of(value).chars().count() == 12
}

/// One letter followed by 7 or 8 digits, nothing else
pub fn is_passport(value: &str) -> bool {
    PASSPORT_REGEX.is_match(value.trim())
}

/// `user@handle` where the handle's first label is an allow-listed provider
pub fn is_payment_handle(value: &str, handles: &BTreeSet<String>) -> bool {
    let value = value.trim();
    if value.matches('@').count() != 1 {
        return false;
    }
    let Some((user, handle)) = value.split_once('@') else {
        return false;
    };
    if !UPI_USER_REGEX.is_match(user) {
        return false;
    }
    let base = handle.split('.').next().unwrap_or_default().to_lowercase();
    handles.contains(&base)
}

/// Locality marker, a 6-digit PIN code, or a comma-separated run of parts
pub fn looks_like_address(text: &str, heuristic: &AddressHeuristic) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    if heuristic.markers.iter().any(|m| lower.contains(m.as_str())) {
        return true;
    }
    if POSTAL_CODE_REGEX.is_match(&lower) {
        return true;
    }
    lower.matches(',').count() >= heuristic.min_commas && lower.chars().count() >= heuristic.min_len
}

impl FieldKind {
    /// Whether `value` has the strict shape of this role
    pub fn matches(&self, value: &str, policy: &DetectionPolicy) -> bool {
        match self {
            Self::Phone => is_phone(value),
            Self::NationalId => is_national_id(value),
            Self::Passport => is_passport(value),
            Self::PaymentHandle => is_payment_handle(value, policy.payment_handles()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles() -> BTreeSet<String> {
        DetectionPolicy::default().payment_handles().clone()
    }

    #[test]
    fn test_phone_counts_digits_only() {
        assert!(is_phone("9876543210"));
        assert!(is_phone("98765 43210"));
        assert!(is_phone("(987) 654-3210"));
        assert!(!is_phone("+91 9876543210")); // 12 digits
        assert!(!is_phone("987654321"));
        assert!(!is_phone(""));
    }

    #[test]
    fn test_devanagari_digits() {
        let heuristic = AddressHeuristic::default();
        assert!(is_phone("९८७६५ ४३२१०"));
        assert!(is_national_id("१२३४ ५६७८ ९०१२"));
        assert!(is_passport("K१२३४५६७"));
        assert!(looks_like_address("पुणे ४११००१", &heuristic));
    }

    #[test]
    fn test_national_id() {
        assert!(is_national_id("1234 5678 9012"));
        assert!(is_national_id("123456789012"));
        assert!(!is_national_id("1234 5678 901"));
        assert!(!is_national_id("XXXX XXXX 9012"));
    }

    #[test]
    fn test_passport() {
        assert!(is_passport("P1234567"));
        assert!(is_passport(" k12345678 "));
        assert!(!is_passport("P123456"));
        assert!(!is_passport("P123456789"));
        assert!(!is_passport("PP1234567"));
        assert!(!is_passport("PXXXXXXX"));
    }

    #[test]
    fn test_payment_handle_allow_list() {
        let handles = handles();
        assert!(is_payment_handle("someone@upi", &handles));
        assert!(is_payment_handle("ravi.kumar@OkSBI", &handles));
        assert!(is_payment_handle("user_1@paytm.in", &handles));
        assert!(!is_payment_handle("someone@unknownbank", &handles));
        assert!(!is_payment_handle("ravi@example.com", &handles));
    }

    #[test]
    fn test_payment_handle_rejects_bad_user() {
        let handles = handles();
        assert!(!is_payment_handle("a@upi", &handles));
        assert!(!is_payment_handle("ra vi@upi", &handles));
        assert!(!is_payment_handle("ravi@ybl@upi", &handles));
        assert!(!is_payment_handle("raviupi", &handles));
    }

    #[test]
    fn test_address_markers_and_pin() {
        let heuristic = AddressHeuristic::default();
        assert!(looks_like_address("12 MG Road", &heuristic));
        assert!(looks_like_address("Flat 4, Sector 21", &heuristic));
        assert!(looks_like_address("Bengaluru 560001", &heuristic));
        assert!(!looks_like_address("Bengaluru 5600011", &heuristic));
        assert!(!looks_like_address("", &heuristic));
    }

    #[test]
    fn test_address_comma_fallback() {
        let heuristic = AddressHeuristic::default();
        assert!(looks_like_address("Koramangala, Bengaluru, KA", &heuristic));
        assert!(!looks_like_address("a,b,c", &heuristic)); // too short
        assert!(!looks_like_address("Koramangala, Bengaluru", &heuristic));
    }

    #[test]
    fn test_sentinel_is_not_an_address() {
        assert!(!looks_like_address(
            crate::types::SENTINEL,
            &AddressHeuristic::default()
        ));
    }

    #[test]
    fn test_kind_dispatch() {
        let policy = DetectionPolicy::default();
        assert!(FieldKind::Phone.matches("9876543210", &policy));
        assert!(!FieldKind::NationalId.matches("9876543210", &policy));
        assert!(FieldKind::PaymentHandle.matches("ravi@ybl", &policy));
    }
}
