//! Field deserializers tolerant of the shapes the bills API actually returns.
//!
//! Drafts come back with `null` in every field the user never filled in, and
//! numeric fields are sometimes sent as strings because they were copied
//! straight from form inputs.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Annotations {
    One(String),
    Many(Vec<String>),
}

/// `null` becomes `T::default()`
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer from a number or numeric string; anything else is 0
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => 0,
        Some(NumberOrText::Int(n)) => n,
        Some(NumberOrText::Float(f)) => f.trunc() as i64,
        Some(NumberOrText::Text(text)) => parse_integer(&text).unwrap_or(0),
    };
    Ok(value)
}

/// Decimal from a number or numeric string; empty or garbage is `None`
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Int(n)) => Some(n as f64),
        Some(NumberOrText::Float(f)) => Some(f),
        Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
    };
    Ok(value)
}

/// Reviewer annotations: a single string, a list, or nothing
pub(crate) fn annotations<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Annotations>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Annotations::One(text)) if text.is_empty() => Vec::new(),
        Some(Annotations::One(text)) => vec![text],
        Some(Annotations::Many(list)) => list,
    };
    Ok(value)
}

/// Leading-integer parse: an optional sign then the digits up to the first
/// other character, so `"12"`, `"12.7"` and `"12abc"` all give 12
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
