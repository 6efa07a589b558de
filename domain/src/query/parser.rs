//! Query interpretation: raw request parameters -> validated [`Query`]

use super::entities::{
    Callback, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, LengthBounds, OutputMode, Query,
};
use crate::core::error::DomainError;
use std::collections::HashMap;

pub const PARAM_CATEGORY: &str = "c";
pub const PARAM_ENCODE: &str = "encode";
pub const PARAM_CALLBACK: &str = "callback";
pub const PARAM_SELECT: &str = "select";
pub const PARAM_MIN_LENGTH: &str = "min_length";
pub const PARAM_MAX_LENGTH: &str = "max_length";

/// Undecoded request parameters
///
/// The first occurrence of a repeated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    values: HashMap<String, String>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }

    /// Whether the key was supplied at all, even with an empty value
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value of the key, treating an empty value as absent
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

/// Parse and validate request parameters into a [`Query`]
///
/// Length bounds are checked individually before the cross check, so a
/// malformed bound is always reported as such.
pub fn parse_query(params: &RawParams) -> Result<Query, DomainError> {
    let min_supplied = params.has(PARAM_MIN_LENGTH);
    let max_supplied = params.has(PARAM_MAX_LENGTH);

    let min = match params.get(PARAM_MIN_LENGTH) {
        Some(raw) => parse_positive(raw).ok_or_else(|| {
            DomainError::invalid_parameter("min_length must be a positive integer")
        })?,
        None => DEFAULT_MIN_LENGTH,
    };

    let max = match params.get(PARAM_MAX_LENGTH) {
        Some(raw) => parse_positive(raw).ok_or_else(|| {
            DomainError::invalid_parameter("max_length must be a positive integer")
        })?,
        None => DEFAULT_MAX_LENGTH,
    };

    if max < min {
        return Err(DomainError::invalid_parameter(
            "max_length must not be less than min_length",
        ));
    }

    let callback = match params.non_empty(PARAM_CALLBACK) {
        Some(raw) => Some(Callback::try_new(raw).ok_or_else(|| {
            DomainError::invalid_parameter("callback must be a valid JavaScript identifier")
        })?),
        None => None,
    };

    let mode = OutputMode::from_encode(params.non_empty(PARAM_ENCODE), callback.is_some());

    Ok(Query {
        categories: parse_categories(params.get(PARAM_CATEGORY)),
        length: LengthBounds {
            min,
            max,
            explicit: min_supplied || max_supplied,
        },
        mode,
        callback,
        selector: params.non_empty(PARAM_SELECT).map(str::to_string),
    })
}

/// Split a comma separated category list, dropping blank entries
pub fn parse_categories(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Plain decimal digits, saturating at `u32::MAX`
fn parse_positive(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only overflow can fail once every byte is a digit
    let value = raw
        .parse::<u64>()
        .map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX));
    (value > 0).then_some(value)
}
