//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! This macro reduces boilerplate in the scanner and keyword table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$tag` - The Tag
/// * `$value` - Optional TokenValue; omit it for tokens displayed from the tag alone
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(Tag::Leq, TokenValue::Text(String::from("<=")));
/// let eof = MK_TOKEN!(Tag::Eof);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($tag:expr) => {
        $crate::lexer::tokens::Token {
            tag: $tag,
            value: None,
        }
    };
    ($tag:expr, $value:expr) => {
        $crate::lexer::tokens::Token {
            tag: $tag,
            value: Some($value),
        }
    };
}
