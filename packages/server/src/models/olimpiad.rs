use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::olimpiad::{DatePair, Olimpiad, OlimpiadStatus};
use crate::error::AppError;
use crate::store::{OlimpiadDraft, OlimpiadFilter};

/// Body for `POST /olimpiads` and `PUT /olimpiads/{id}`. Updates are
/// full-replace, so both operations share the same shape and validation.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct OlimpiadPayload {
    pub name: String,
    pub subject: String,
    pub level: String,
    #[serde(default)]
    pub status: OlimpiadStatus,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub dates: Vec<DatePair>,
    /// Raw feature-id → scalar map; parsed against the feature registry.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub feature_values: HashMap<Uuid, Value>,
}

impl OlimpiadPayload {
    pub fn into_draft(self) -> OlimpiadDraft {
        OlimpiadDraft {
            name: self.name,
            subject: self.subject,
            level: self.level,
            status: self.status,
            avatar_url: self.avatar_url,
            dates: self.dates,
            feature_values: self.feature_values,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OlimpiadListQuery {
    /// Comma-separated status set; omitted or empty means no restriction.
    pub status: Option<String>,
    /// Comma-separated subject set; exact match per subject.
    pub subject: Option<String>,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
}

impl OlimpiadListQuery {
    pub fn into_filter(self) -> Result<OlimpiadFilter, AppError> {
        let mut statuses = HashSet::new();
        if let Some(ref raw) = self.status {
            for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let status = OlimpiadStatus::parse(token).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Unknown status '{token}'. Must be one of: upcoming, register_opened, ongoing, completed"
                    ))
                })?;
                statuses.insert(status);
            }
        }

        let subjects: HashSet<String> = self
            .subject
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let name_contains = self
            .search
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        Ok(OlimpiadFilter {
            statuses,
            subjects,
            name_contains,
        })
    }
}

/// Body for `PUT /olimpiads/{id}/features/{feature_id}`. `null` or the
/// `"none"` sentinel clears the value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetFeatureValueRequest {
    #[schema(value_type = Object)]
    pub value: Value,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct OlimpiadResponse {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub level: String,
    pub status: OlimpiadStatus,
    pub avatar_url: Option<String>,
    pub dates: Vec<DatePair>,
    #[schema(value_type = Object)]
    pub feature_values: BTreeMap<Uuid, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Olimpiad> for OlimpiadResponse {
    fn from(o: Olimpiad) -> Self {
        Self {
            id: o.id,
            name: o.name,
            subject: o.subject,
            level: o.level,
            status: o.status,
            avatar_url: o.avatar_url,
            dates: o.dates,
            feature_values: o
                .feature_values
                .into_iter()
                .map(|(id, value)| (id, value.to_json()))
                .collect(),
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
