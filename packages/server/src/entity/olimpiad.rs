use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::feature::FeatureValue;

/// Lifecycle status of an olimpiad. A flat enum: any status may be set to
/// any other directly, there is no guarded transition workflow.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OlimpiadStatus {
    #[default]
    Upcoming,
    RegisterOpened,
    Ongoing,
    Completed,
}

impl OlimpiadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OlimpiadStatus::Upcoming => "upcoming",
            OlimpiadStatus::RegisterOpened => "register_opened",
            OlimpiadStatus::Ongoing => "ongoing",
            OlimpiadStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(OlimpiadStatus::Upcoming),
            "register_opened" => Some(OlimpiadStatus::RegisterOpened),
            "ongoing" => Some(OlimpiadStatus::Ongoing),
            "completed" => Some(OlimpiadStatus::Completed),
            _ => None,
        }
    }
}

/// A labelled calendar date on an olimpiad. Records keep these in insertion
/// order (display order); duplicates are permitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DatePair {
    pub label: String,
    pub date: NaiveDate,
}

/// A competition record.
#[derive(Clone, Debug, PartialEq)]
pub struct Olimpiad {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub level: String,
    pub status: OlimpiadStatus,
    pub avatar_url: Option<String>,
    pub dates: Vec<DatePair>,
    /// Every key refers to a currently existing feature definition. The
    /// delete-feature cascade and the strict write policy keep this true.
    pub feature_values: BTreeMap<Uuid, FeatureValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
