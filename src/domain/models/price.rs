use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Money amount as the backend exchanges it. Values arrive as decimal strings,
/// plain numbers or null; anything missing or unreadable counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(pub f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn value(self) -> f64 {
        self.0
    }

    /// Accepts `"150.00"`, `"150,5"`, `" 20 "`; blank or garbage yields zero.
    pub fn parse_lenient(raw: &str) -> Self {
        let cleaned = raw.trim().replace(',', ".");
        if cleaned.is_empty() {
            return Self::ZERO;
        }
        Self(cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) => Price(n),
            RawPrice::Text(s) => Price::parse_lenient(&s),
            RawPrice::Null(()) => Price::ZERO,
        })
    }
}
