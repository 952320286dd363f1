use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Gallery display position.
///
/// Clients send this as a number, a numeric string, or not at all. Anything
/// that does not start with an integer collapses to 0, so a bad value never
/// rejects the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrderNum(pub i64);

impl OrderNum {
    /// Parse the leading `[+-]?digits` prefix of `raw`, ignoring surrounding
    /// whitespace. `"3"`, `" 3 "`, `"3rd"` and `"3.9"` all give 3.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return Self(0);
        }

        match digits[..end].parse::<i64>() {
            Ok(n) if negative => Self(-n),
            Ok(n) => Self(n),
            Err(_) => Self(0),
        }
    }

    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self(i)
                } else {
                    n.as_f64()
                        .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                        .map(|f| Self(f.trunc() as i64))
                        .unwrap_or_default()
                }
            }
            Value::String(s) => Self::parse(s),
            _ => Self(0),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for OrderNum {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for OrderNum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
