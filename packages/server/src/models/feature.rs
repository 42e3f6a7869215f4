use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::feature::{FeatureDefinition, FeatureKind};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateFeatureRequest {
    pub name: String,
    /// Value kind, fixed for the lifetime of the definition.
    #[serde(rename = "type")]
    pub kind: FeatureKind,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FeatureResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub created_at: DateTime<Utc>,
}

impl From<FeatureDefinition> for FeatureResponse {
    fn from(d: FeatureDefinition) -> Self {
        Self {
            id: d.id,
            name: d.name,
            kind: d.kind,
            created_at: d.created_at,
        }
    }
}
