//! Maskers: keep just enough structure for a human to verify the value, hide the rest.
//!
//! A masker given a value that fails its classifier returns [`SENTINEL`] instead of
//! partially masking malformed data.

use crate::detector::{digits_of, is_passport};
use crate::types::{FieldKind, SENTINEL};

fn x_run(count: usize) -> String {
    "X".repeat(count)
}

/// First `keep` characters, then `X` for the rest
fn keep_prefix(text: &str, keep: usize) -> String {
    let len = text.chars().count();
    let mut masked: String = text.chars().take(keep).collect();
    masked.push_str(&x_run(len.saturating_sub(keep)));
    masked
}

/// Last `count` characters of `text`
fn tail(text: &str, count: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(count)).collect()
}

/// `98XXXXXX10`
pub fn mask_phone(value: &str) -> String {
    let digits = digits_of(value);
    if digits.chars().count() != 10 {
        return SENTINEL.to_string();
    }
    let head: String = digits.chars().take(2).collect();
    format!("{head}{}{}", x_run(6), tail(&digits, 2))
}

/// `XXXX XXXX 9012`
pub fn mask_national_id(value: &str) -> String {
    let digits = digits_of(value);
    if digits.chars().count() != 12 {
        return SENTINEL.to_string();
    }
    format!("XXXX XXXX {}", tail(&digits, 4))
}

pub fn mask_passport(value: &str) -> String {
    let value = value.trim();
    if !is_passport(value) {
        return SENTINEL.to_string();
    }
    keep_prefix(value, 1)
}

/// Masks the user part; the provider handle is not sensitive and stays readable.
pub fn mask_payment_handle(value: &str) -> String {
    let value = value.trim();
    let Some((user, handle)) = value.split_once('@') else {
        return SENTINEL.to_string();
    };
    let chars: Vec<char> = user.chars().collect();
    let masked_user = if chars.len() <= 4 {
        keep_prefix(user, 1)
    } else {
        let head: String = chars[..2].iter().collect();
        format!("{head}{}{}", x_run(chars.len() - 4), tail(user, 2))
    };
    format!("{masked_user}@{handle}")
}

/// `Ravi Kumar` -> `RXXX KXXXX`. Whitespace-only input comes back unchanged.
pub fn mask_name(value: &str) -> String {
    let tokens: Vec<String> = value
        .split_whitespace()
        .map(|token| keep_prefix(token, 1))
        .collect();
    if tokens.is_empty() {
        return value.to_string();
    }
    tokens.join(" ")
}

/// `ravi@example.com` -> `raXXX@example.com`; the X count never reveals the local length.
pub fn mask_email(value: &str) -> String {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return SENTINEL.to_string();
    };
    let masked_local = if local.chars().count() <= 2 {
        keep_prefix(local, 1)
    } else {
        let head: String = local.chars().take(2).collect();
        format!("{head}XXX")
    };
    format!("{masked_local}@{domain}")
}

impl FieldKind {
    pub fn mask(&self, value: &str) -> String {
        match self {
            Self::Phone => mask_phone(value),
            Self::NationalId => mask_national_id(value),
            Self::Passport => mask_passport(value),
            Self::PaymentHandle => mask_payment_handle(value),
        }
    }
}
