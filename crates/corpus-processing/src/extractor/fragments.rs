//! Resolution of a message's text field into one flat string.
//!
//! Chat exports store text either as a plain string or as a list mixing plain
//! strings with formatting objects (`{"type": "bold", "text": "..."}`), links,
//! mentions and so on. [`TextField`] captures those shapes explicitly and
//! [`resolve`] flattens them.

use serde_json::Value;
use std::borrow::Cow;

/// The text field of one raw message.
#[derive(Debug, Clone, PartialEq)]
pub enum TextField<'a> {
    /// No usable text field: missing, or a value that is neither string nor list.
    Absent,
    /// A plain string, possibly empty.
    Plain(&'a str),
    /// An ordered list of fragments.
    Fragments(Vec<Fragment<'a>>),
}

/// One element of a fragmented text field.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<'a> {
    /// Text contributed by the fragment.
    Text(Cow<'a, str>),
    /// Anything without usable text; skipped during resolution.
    Other,
}

impl<'a> TextField<'a> {
    /// Classify the value stored under the text key of a message.
    pub fn from_value(value: Option<&'a Value>, text_key: &str) -> Self {
        match value {
            Some(Value::String(s)) => TextField::Plain(s.as_str()),
            Some(Value::Array(items)) => TextField::Fragments(
                items
                    .iter()
                    .map(|item| Fragment::from_value(item, text_key))
                    .collect(),
            ),
            _ => TextField::Absent,
        }
    }

    pub fn is_fragmented(&self) -> bool {
        matches!(self, TextField::Fragments(_))
    }
}

impl<'a> Fragment<'a> {
    /// Classify one list element.
    ///
    /// Strings are used verbatim. Objects contribute their own text sub-field;
    /// a numeric or boolean sub-field is coerced to its textual form.
    pub fn from_value(value: &'a Value, text_key: &str) -> Self {
        match value {
            Value::String(s) => Fragment::Text(Cow::Borrowed(s.as_str())),
            Value::Object(map) => match map.get(text_key) {
                Some(Value::String(s)) => Fragment::Text(Cow::Borrowed(s.as_str())),
                Some(Value::Number(n)) => Fragment::Text(Cow::Owned(n.to_string())),
                Some(Value::Bool(b)) => Fragment::Text(Cow::Owned(b.to_string())),
                _ => Fragment::Other,
            },
            _ => Fragment::Other,
        }
    }
}

/// Flatten a text field into a single string.
///
/// Returns `None` only for [`TextField::Absent`]. Plain strings come back
/// as-is, including the empty string; fragments are concatenated in order with
/// no separator, and the result may be empty. Filtering is left to the caller.
pub fn resolve(field: &TextField<'_>) -> Option<String> {
    match field {
        TextField::Absent => None,
        TextField::Plain(s) => Some((*s).to_string()),
        TextField::Fragments(fragments) => Some(
            fragments
                .iter()
                .filter_map(|fragment| match fragment {
                    Fragment::Text(text) => Some(text.as_ref()),
                    Fragment::Other => None,
                })
                .collect(),
        ),
    }
}
