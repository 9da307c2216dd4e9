// Query string encoding with list-repetition (`key[]=a&key[]=b`) for arrays.

use indexmap::IndexMap;
use url::form_urlencoded::byte_serialize;

/// One query parameter value: a scalar or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl QueryValue {
    /// `true` for an empty string or an empty list.
    ///
    /// The encoder never filters; callers use this to drop absent
    /// parameters before encoding.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// Ordered parameter mapping; insertion order is output order.
pub type Query = IndexMap<String, QueryValue>;

fn escape(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

/// Serialize `params` into a query string (without the leading `?`).
///
/// Scalars emit `key=value`; lists emit one `key[]=element` per element in
/// list order. Keys and values are form-urlencoded. An empty mapping yields
/// an empty string.
pub fn encode(params: &Query) -> String {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let key = escape(key);
        match value {
            QueryValue::Scalar(v) => pairs.push(format!("{key}={}", escape(v))),
            QueryValue::List(items) => {
                pairs.extend(items.iter().map(|v| format!("{key}[]={}", escape(v))));
            }
        }
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn query(entries: &[(&str, QueryValue)]) -> Query {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_mapping_is_empty_string() {
        assert_eq!(encode(&Query::new()), "");
    }

    #[test]
    fn scalars_keep_insertion_order() {
        let q = query(&[("b", "2".into()), ("a", "1".into())]);
        assert_eq!(encode(&q), "b=2&a=1");

        let q = query(&[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(encode(&q), "a=1&b=2");
    }

    #[test]
    fn lists_repeat_the_key_with_brackets() {
        let q = query(&[("a", QueryValue::from(&["1", "2"][..]))]);
        assert_eq!(encode(&q), "a[]=1&a[]=2");
    }

    #[test]
    fn mixed_lists_and_scalars() {
        let q = query(&[
            ("hostIds", QueryValue::from(&["h1", "h2"][..])),
            ("time", "2024-01-01T00:00:00Z".into()),
        ]);
        assert_eq!(
            encode(&q),
            "hostIds[]=h1&hostIds[]=h2&time=2024-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        let q = query(&[("a b", "c&d=e/f".into())]);
        assert_eq!(encode(&q), "a+b=c%26d%3De%2Ff");
    }

    #[test]
    fn encoder_does_not_filter_empty_values() {
        let q = query(&[("time", "".into()), ("ids", QueryValue::List(vec![]))]);
        assert_eq!(encode(&q), "time=");
        assert!(q["time"].is_empty());
        assert!(q["ids"].is_empty());
    }
}
