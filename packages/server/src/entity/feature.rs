use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// String sentinel accepted on the wire as "value not set". Stored values
/// never contain it; an unset feature is simply absent from the map.
pub const UNSET_SENTINEL: &str = "none";

/// Kind of value a feature holds. Fixed at creation, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Text,
    Image,
    Number,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Text => "text",
            FeatureKind::Image => "image",
            FeatureKind::Number => "number",
        }
    }
}

/// An administrator-defined attribute applied across all olimpiads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub created_at: DateTime<Utc>,
}

/// A typed feature value. The variant always matches the kind of the
/// definition it is stored under; the store enforces this at write time.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Image(String),
    Number(f64),
}

impl FeatureValue {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Text(_) => FeatureKind::Text,
            FeatureValue::Image(_) => FeatureKind::Image,
            FeatureValue::Number(_) => FeatureKind::Number,
        }
    }

    /// Wire form: the raw scalar, without a variant tag.
    pub fn to_json(&self) -> Value {
        match self {
            FeatureValue::Text(s) | FeatureValue::Image(s) => Value::String(s.clone()),
            FeatureValue::Number(n) => serde_json::json!(n),
        }
    }
}
