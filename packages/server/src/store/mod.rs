use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::feature::{FeatureDefinition, FeatureKind, FeatureValue, UNSET_SENTINEL};
use crate::entity::olimpiad::{DatePair, Olimpiad, OlimpiadStatus};

/// Errors produced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

/// Validated input for creating or fully replacing an olimpiad.
/// `feature_values` carries the raw wire scalars; the store parses them
/// against the current feature registry before any mutation.
#[derive(Clone, Debug, Default)]
pub struct OlimpiadDraft {
    pub name: String,
    pub subject: String,
    pub level: String,
    pub status: OlimpiadStatus,
    pub avatar_url: Option<String>,
    pub dates: Vec<DatePair>,
    pub feature_values: HashMap<Uuid, Value>,
}

/// Filter criteria for listing olimpiads. All predicates are ANDed; an empty
/// set means "no restriction on that axis". `name_contains` is matched as a
/// case-insensitive substring and must already be lowercased.
#[derive(Clone, Debug, Default)]
pub struct OlimpiadFilter {
    pub statuses: HashSet<OlimpiadStatus>,
    pub subjects: HashSet<String>,
    pub name_contains: String,
}

impl OlimpiadFilter {
    fn matches(&self, olimpiad: &Olimpiad) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&olimpiad.status))
            && (self.subjects.is_empty() || self.subjects.contains(&olimpiad.subject))
            && (self.name_contains.is_empty()
                || olimpiad.name.to_lowercase().contains(&self.name_contains))
    }
}

#[derive(Default)]
struct Inner {
    features: IndexMap<Uuid, FeatureDefinition>,
    olimpiads: IndexMap<Uuid, Olimpiad>,
}

/// In-memory store owning both the feature registry and the olimpiad
/// records. Both live behind one lock so the delete-feature cascade is
/// atomic from any caller's point of view: either the definition and all of
/// its values are gone, or none are. Iteration order is insertion order.
pub struct Store {
    inner: RwLock<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    pub async fn list_features(&self) -> Vec<FeatureDefinition> {
        let inner = self.inner.read().await;
        inner.features.values().cloned().collect()
    }

    /// Create a feature definition. Existing records are not touched: a
    /// record without the new key simply has the value "not set".
    pub async fn create_feature(
        &self,
        name: &str,
        kind: FeatureKind,
    ) -> Result<FeatureDefinition, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Feature name must not be empty".into(),
            ));
        }

        let definition = FeatureDefinition {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.features.insert(definition.id, definition.clone());
        Ok(definition)
    }

    /// Delete a feature definition and strip its value from every record.
    pub async fn delete_feature(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.features.shift_remove(&id).is_none() {
            return Err(StoreError::NotFound("Feature not found".into()));
        }
        for olimpiad in inner.olimpiads.values_mut() {
            olimpiad.feature_values.remove(&id);
        }
        Ok(())
    }

    pub async fn list_olimpiads(&self, filter: &OlimpiadFilter) -> Vec<Olimpiad> {
        let inner = self.inner.read().await;
        inner
            .olimpiads
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect()
    }

    pub async fn get_olimpiad(&self, id: Uuid) -> Result<Olimpiad, StoreError> {
        let inner = self.inner.read().await;
        inner
            .olimpiads
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Olimpiad not found".into()))
    }

    pub async fn create_olimpiad(&self, draft: OlimpiadDraft) -> Result<Olimpiad, StoreError> {
        let mut inner = self.inner.write().await;
        let feature_values = validate_draft(&inner.features, &draft)?;

        let now = Utc::now();
        let olimpiad = Olimpiad {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            level: draft.level.trim().to_string(),
            status: draft.status,
            avatar_url: draft.avatar_url,
            dates: draft.dates,
            feature_values,
            created_at: now,
            updated_at: now,
        };

        inner.olimpiads.insert(olimpiad.id, olimpiad.clone());
        Ok(olimpiad)
    }

    /// Full-replace update. Preserves `id`, `created_at` and the record's
    /// position in insertion order.
    pub async fn update_olimpiad(
        &self,
        id: Uuid,
        draft: OlimpiadDraft,
    ) -> Result<Olimpiad, StoreError> {
        let mut inner = self.inner.write().await;
        let created_at = inner
            .olimpiads
            .get(&id)
            .map(|o| o.created_at)
            .ok_or_else(|| StoreError::NotFound("Olimpiad not found".into()))?;
        let feature_values = validate_draft(&inner.features, &draft)?;

        let olimpiad = Olimpiad {
            id,
            name: draft.name.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            level: draft.level.trim().to_string(),
            status: draft.status,
            avatar_url: draft.avatar_url,
            dates: draft.dates,
            feature_values,
            created_at,
            updated_at: Utc::now(),
        };

        inner.olimpiads.insert(id, olimpiad.clone());
        Ok(olimpiad)
    }

    /// Not idempotent: deleting the same id twice fails the second time.
    pub async fn delete_olimpiad(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .olimpiads
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound("Olimpiad not found".into()))
    }

    /// Append a labelled date. Duplicates are allowed and order is kept.
    pub async fn add_date(&self, id: Uuid, pair: DatePair) -> Result<Olimpiad, StoreError> {
        let mut inner = self.inner.write().await;
        let olimpiad = inner
            .olimpiads
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Olimpiad not found".into()))?;
        olimpiad.dates.push(pair);
        olimpiad.updated_at = Utc::now();
        Ok(olimpiad.clone())
    }

    /// Set (or clear) a single feature value on a record. `null` and the
    /// `"none"` sentinel clear the value; anything else must parse against
    /// the definition's kind.
    pub async fn set_feature_value(
        &self,
        id: Uuid,
        feature_id: Uuid,
        raw: &Value,
    ) -> Result<Olimpiad, StoreError> {
        let mut inner = self.inner.write().await;
        let Inner {
            features,
            olimpiads,
        } = &mut *inner;

        let olimpiad = olimpiads
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Olimpiad not found".into()))?;
        let definition = features
            .get(&feature_id)
            .ok_or_else(|| StoreError::NotFound("Feature not found".into()))?;
        let parsed = parse_feature_value(definition, raw)?;

        match parsed {
            Some(value) => {
                olimpiad.feature_values.insert(feature_id, value);
            }
            None => {
                olimpiad.feature_values.remove(&feature_id);
            }
        }
        olimpiad.updated_at = Utc::now();
        Ok(olimpiad.clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a draft against the current registry. Runs before any mutation
/// so a failed write leaves the store unchanged.
fn validate_draft(
    features: &IndexMap<Uuid, FeatureDefinition>,
    draft: &OlimpiadDraft,
) -> Result<BTreeMap<Uuid, FeatureValue>, StoreError> {
    validate_required("name", &draft.name)?;
    validate_required("subject", &draft.subject)?;
    validate_required("level", &draft.level)?;

    let mut values = BTreeMap::new();
    for (feature_id, raw) in &draft.feature_values {
        let definition = features.get(feature_id).ok_or_else(|| {
            StoreError::Validation(format!("Unknown feature id {feature_id}"))
        })?;
        if let Some(value) = parse_feature_value(definition, raw)? {
            values.insert(*feature_id, value);
        }
    }
    Ok(values)
}

fn validate_required(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!(
            "Field '{field}' must not be empty"
        )));
    }
    Ok(())
}

/// Parse a raw wire scalar against a definition's kind. `Ok(None)` means
/// "not set": the key must be absent from the record's map.
fn parse_feature_value(
    definition: &FeatureDefinition,
    raw: &Value,
) -> Result<Option<FeatureValue>, StoreError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) if s == UNSET_SENTINEL => Ok(None),
        Value::String(s) => match definition.kind {
            FeatureKind::Text => Ok(Some(FeatureValue::Text(s.clone()))),
            FeatureKind::Image => Ok(Some(FeatureValue::Image(s.clone()))),
            FeatureKind::Number => Err(StoreError::Validation(format!(
                "Feature '{}' expects a number",
                definition.name
            ))),
        },
        Value::Number(n) => {
            if definition.kind != FeatureKind::Number {
                return Err(StoreError::Validation(format!(
                    "Feature '{}' expects a {} value",
                    definition.name,
                    definition.kind.as_str()
                )));
            }
            let n = n.as_f64().ok_or_else(|| {
                StoreError::Validation(format!(
                    "Feature '{}' value is out of range",
                    definition.name
                ))
            })?;
            Ok(Some(FeatureValue::Number(n)))
        }
        _ => Err(StoreError::Validation(format!(
            "Feature '{}' value must be a string or number",
            definition.name
        ))),
    }
}
