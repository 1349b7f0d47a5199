use serde_json::Value;
use std::fmt;

/// A card field as the service sent it: a number, or anything else shown as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => number.as_f64().map(Self::Number),
            other => Some(Self::Text(plain_text(other))),
        }
    }
}

impl From<f64> for Scalar {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// A task annotated by the scoring service.
///
/// The service echoes back whatever it was sent, so every field is optional
/// and read leniently: a field of an unexpected type is kept as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredTask {
    pub title: Option<String>,
    pub score: Option<Scalar>,
    pub explanation: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<Scalar>,
    pub importance: Option<Scalar>,
}

impl ScoredTask {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .filter(|field| !field.is_null())
                .map(plain_text)
        };
        let scalar = |key: &str| value.get(key).and_then(Scalar::from_value);

        Self {
            title: text("title"),
            score: scalar("score"),
            explanation: text("explanation"),
            due_date: text("due_date"),
            estimated_hours: scalar("estimated_hours"),
            importance: scalar("importance"),
        }
    }
}

// Strings lose their JSON quotes; everything else keeps its JSON text.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
