//! Collection syntaxes.
//!
//! A collection can be supplied four ways, all producing the same
//! elements:
//! - comma separated text: `a,b,c`
//! - bracketed, quoted text: `["a", "b", "c"]` (single quotes also work)
//! - indexed keys: `key[0]=a`, `key[1]=b` (or `key.0`, `KEY_0`)
//! - a YAML sequence, which sources flatten into indexed keys
//!
//! Elements are trimmed and empty elements are dropped.

use crate::source::RawValue;

/// Splits a raw value into its element texts.
///
/// # Examples
///
/// ```
/// use unicfg::coerce::list::elements;
/// use unicfg::source::RawValue;
///
/// let comma = elements(&RawValue::Text("a, b".into()));
/// let bracketed = elements(&RawValue::Text(r#"["a", "b"]"#.into()));
/// let indexed = elements(&RawValue::Indexed(vec!["a".into(), "b".into()]));
/// assert_eq!(comma, vec!["a", "b"]);
/// assert_eq!(comma, bracketed);
/// assert_eq!(comma, indexed);
/// ```
#[must_use]
pub fn elements(raw: &RawValue) -> Vec<String> {
    match raw {
        RawValue::Indexed(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        RawValue::Text(text) => {
            let text = text.trim();
            match text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                Some(inner) => split_quoted(inner),
                None => split_plain(text),
            }
        }
    }
}

fn split_plain(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits bracket contents on commas outside quotes. Quotes are removed and
/// `\` escapes the next character inside a quoted element.
fn split_quoted(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) if c == '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ',' => items.push(std::mem::take(&mut current)),
            None => current.push(c),
        }
    }
    items.push(current);

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
