// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Text and number canonicalization applied before matching and summation.
//!
//! Amounts follow one rule regardless of locale: the last separator (`.` or `,`) is the
//! decimal marker and every earlier one groups thousands. The single exception is a value
//! with only one kind of separator repeated (`1.234.567`), which is read as thousands
//! grouping throughout.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)u\$s|^\s*[a-z]{3}|[a-z]{3}\s*$|\p{Sc}").expect("currency pattern")
});

/// Outcome of normalizing one amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Empty,
    Value(Decimal),
    Invalid,
}

/// Trim and case-fold a concept label for matching.
pub fn category_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn parse_amount(raw: &str) -> Amount {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Amount::Empty;
    }
    let stripped = CURRENCY.replace_all(trimmed, "");
    let (negative, body) = split_sign(stripped.trim());
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit())
        || !cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return Amount::Invalid;
    }
    match canonical(&cleaned).and_then(|s| Decimal::from_str(&s).ok()) {
        Some(v) if negative => Amount::Value(-v),
        Some(v) => Amount::Value(v),
        None => Amount::Invalid,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return (true, inner.trim());
    }
    if let Some(rest) = s.strip_prefix('-') {
        return (true, rest.trim_start());
    }
    if let Some(rest) = s.strip_suffix('-') {
        return (true, rest.trim_end());
    }
    (false, s.strip_prefix('+').unwrap_or(s))
}

/// Rewrite a digits-and-separators string into `1234.56` form.
fn canonical(s: &str) -> Option<String> {
    let Some(idx) = s.rfind(['.', ',']) else {
        return Some(s.to_string());
    };
    let sep = if s[idx..].starts_with('.') { '.' } else { ',' };
    let other = if sep == '.' { ',' } else { '.' };
    let repeated = s.matches(sep).count() > 1 && !s.contains(other);

    let (int_part, frac) = if repeated {
        (s, "")
    } else {
        (&s[..idx], &s[idx + 1..])
    };
    let mut digits: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        if frac.is_empty() {
            return None;
        }
        digits.push('0');
    }
    if frac.is_empty() {
        Some(digits)
    } else {
        Some(format!("{}.{}", digits, frac))
    }
}
