// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Phone-number normalization for contact matching.
//
// Numbers sourced from the SIM, the contacts provider, or user input come
// in national notation ("0171 123-456") or international notation
// ("+49 171 123456") with arbitrary grouping characters. Matching needs
// one canonical form: `+<country><digits>`.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `+` and/or `0`, then digits with optional grouping characters.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\+)?(0)?([\d\s()\-]+)$").expect("phone pattern"));

/// Normalize a phone number to `+<country><digits>` form.
///
/// A leading `0` (national notation) is replaced by the given country
/// calling code; an existing `+` prefix keeps the number's own country
/// code. Grouping characters are stripped. Input that is neither notation
/// (or both at once, "+0…") is rejected.
pub fn format_phone_number(input: &str, country_calling_code: &str) -> Option<String> {
    let captures = PHONE_RE.captures(input)?;

    let has_plus = captures.get(1).is_some();
    let has_zero = captures.get(2).is_some();
    let digits: String = captures
        .get(3)
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())?;
    if digits.is_empty() {
        return None;
    }

    match (has_plus, has_zero) {
        (false, true) => Some(format!("+{country_calling_code}{digits}")),
        (true, false) => Some(format!("+{digits}")),
        _ => None,
    }
}
