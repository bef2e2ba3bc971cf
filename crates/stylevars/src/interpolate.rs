//! variable reference syntaxes
//!
//! Two ways to reference a variable inside a text field:
//! - bare: `$name`, the sigil must start the field or follow a non-word character
//! - parenthesized: `$(name)`, optionally padded with whitespace inside the parens
//!
//! Names consist of word characters, `-` and `.` (dots address nested values).
//!
//! [interpolate] always runs the bare pass over the whole field first and the
//! parenthesized pass over its result.
use crate::util::RegexExt;
use regex::Regex;
use std::sync::LazyLock;

/// Marks the start of a variable name or reference
pub const SIGIL: char = '$';

static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9_])\$([A-Za-z0-9_.\-]+)").expect("bare syntax regex is valid")
});

static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(\s*([A-Za-z0-9_.\-]+)\s*\)").expect("parenthesized syntax regex is valid")
});

/// Replaces bare `$name` references
///
/// `resolve` is called with the full token (`$name`) and the name. The character in front of the
/// sigil is kept as-is.
pub fn bare<E>(
    text: &str,
    mut resolve: impl FnMut(&str, &str) -> Result<String, E>,
) -> Result<String, E> {
    BARE.try_replace_all(text, |captures| {
        let before = &captures[1];
        let name = &captures[2];
        let token = format!("{SIGIL}{name}");
        Ok(format!("{before}{}", resolve(&token, name)?))
    })
}

/// Replaces parenthesized `$(name)` references
///
/// `resolve` is called with the full match (`$( name )`) and the trimmed name.
pub fn parenthesized<E>(
    text: &str,
    mut resolve: impl FnMut(&str, &str) -> Result<String, E>,
) -> Result<String, E> {
    PARENTHESIZED.try_replace_all(text, |captures| resolve(&captures[0], &captures[1]))
}

/// Runs both passes, bare first
pub fn interpolate<E>(
    text: &str,
    mut resolve: impl FnMut(&str, &str) -> Result<String, E>,
) -> Result<String, E> {
    let text = bare(text, &mut resolve)?;
    parenthesized(&text, &mut resolve)
}
