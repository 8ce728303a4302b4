//! Locale-grouped rendering and lenient parsing of whole numbers
//!
//! Inputs for areas, prices and amounts are typed by hand with whatever
//! separators the user likes ("2.500.000", "2 500 000", "2,500,000đ").
//! [`parse_number`] keeps the digits only; [`NumberFormat::format`] groups
//! them again for display. Only non-negative integers are supported.

use serde::{Deserialize, Serialize};

/// Digit grouping used when rendering numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Character inserted between groups of three digits
    pub group_separator: char,
}

impl NumberFormat {
    /// `vi-VN`: 2.500.000
    pub const VI_VN: Self = Self {
        group_separator: '.',
    };

    /// `en-US`: 2,500,000
    pub const EN_US: Self = Self {
        group_separator: ',',
    };

    /// Pick the grouping for a BCP 47 locale tag. Unknown locales use `vi-VN`.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "en" | "ja" | "zh" | "ko" => Self::EN_US,
            _ => Self::VI_VN,
        }
    }

    /// Render `n` with thousands separators
    pub fn format(&self, n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }

        out
    }

    /// Parse a hand-typed number; see [`parse_number`]
    pub fn parse(&self, input: &str) -> u64 {
        parse_number(input)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::VI_VN
    }
}

/// Render `n` with the default (`vi-VN`) grouping
pub fn format_number(n: u64) -> String {
    NumberFormat::VI_VN.format(n)
}

/// Strip every non-digit character and parse the rest.
///
/// Empty input (or input without digits) yields 0. Values beyond `u64::MAX`
/// saturate.
pub fn parse_number(input: &str) -> u64 {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return 0;
    }

    digits.parse().unwrap_or(u64::MAX)
}
