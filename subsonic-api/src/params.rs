//! Endpoint parameter marshalling.
//!
//! Subsonic takes flat string parameters. Lists are sent as repeated keys
//! (`songId=1&songId=2`), booleans as `true`/`false`, and timestamps as
//! integer milliseconds since the Unix epoch. Unset optional parameters are
//! left out of the request entirely.

use chrono::{DateTime, Utc};

/// A value that can be sent as a request parameter.
pub trait ParamValue {
    fn to_param(&self) -> String;
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_owned()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        if *self { "true" } else { "false" }.to_owned()
    }
}

macro_rules! display_param {
    ($($ty:ty),*) => {
        $(impl ParamValue for $ty {
            fn to_param(&self) -> String {
                self.to_string()
            }
        })*
    };
}

display_param!(u8, u16, u32, u64, usize, i32, i64, f32, f64);

impl ParamValue for DateTime<Utc> {
    fn to_param(&self) -> String {
        self.timestamp_millis().to_string()
    }
}

/// Ordered list of endpoint parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl ParamValue) -> Self {
        self.pairs.push((key.to_owned(), value.to_param()));
        self
    }

    /// Add a parameter only when `value` is `Some`.
    #[must_use]
    pub fn opt<V: ParamValue>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Add one `key=value` pair per element.
    #[must_use]
    pub fn list<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ParamValue,
    {
        for value in values {
            self.pairs.push((key.to_owned(), value.to_param()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Percent-encode `key=value` pairs joined by `&`.
///
/// Used verbatim as the query string (GET) or the form body (POST).
pub(crate) fn encode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
