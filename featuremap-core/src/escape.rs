//! SQLite-dialect quoting for literals and identifiers.
//!
//! # Examples
//! ```
//! use featuremap_core::escape::{quote_identifier, quote_literal};
//!
//! assert_eq!(quote_literal("O'Brien"), "'O''Brien'");
//! assert_eq!(quote_identifier("roads"), "\"roads\"");
//! ```

/// Wrap `text` in single quotes, doubling any embedded single quote.
#[must_use]
pub fn quote_literal(text: &str) -> String {
    quote_with(text, '\'')
}

/// Wrap `name` in double quotes, doubling any embedded double quote.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    quote_with(name, '"')
}

fn quote_with(text: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(quote);
    for ch in text.chars() {
        if ch == quote {
            quoted.push(quote);
        }
        quoted.push(ch);
    }
    quoted.push(quote);
    quoted
}
