use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::FilterError;
use crate::models::GraphRecord;

/// How multiple date-range filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    And,
    Or,
}

/// Query-time filters. Scope filters (organization, type, category) restrict
/// which records form the corpus and therefore participate in the cache key;
/// the date ranges are evaluated against retrieved candidates under
/// [`FilterMode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub organization_id: Option<String>,
    pub entity_type: Option<String>,
    pub relation_type: Option<String>,
    pub topic_category: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub mode: FilterMode,
}

impl SearchFilters {
    /// Reject malformed combinations before any index work begins.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(after), Some(before)) = (self.created_after, self.created_before) {
            if after > before {
                return Err(FilterError::ConflictingRange { field: "created" });
            }
        }
        if let (Some(after), Some(before)) = (self.updated_after, self.updated_before) {
            if after > before {
                return Err(FilterError::ConflictingRange { field: "updated" });
            }
        }
        Ok(())
    }

    /// Whether any date-range constraint is set.
    pub fn has_date_constraints(&self) -> bool {
        self.created_after.is_some()
            || self.created_before.is_some()
            || self.updated_after.is_some()
            || self.updated_before.is_some()
    }

    /// Evaluate the date-range constraints against a record under the
    /// configured combination mode. Records without a timestamp fail the
    /// constraints that need it.
    pub fn matches_dates(&self, record: &GraphRecord) -> bool {
        if !self.has_date_constraints() {
            return true;
        }

        let mut checks: Vec<bool> = Vec::with_capacity(4);
        if let Some(bound) = self.created_after {
            checks.push(record.created_at.is_some_and(|t| t >= bound));
        }
        if let Some(bound) = self.created_before {
            checks.push(record.created_at.is_some_and(|t| t <= bound));
        }
        if let Some(bound) = self.updated_after {
            checks.push(record.updated_at.is_some_and(|t| t >= bound));
        }
        if let Some(bound) = self.updated_before {
            checks.push(record.updated_at.is_some_and(|t| t <= bound));
        }

        match self.mode {
            FilterMode::And => checks.iter().all(|c| *c),
            FilterMode::Or => checks.iter().any(|c| *c),
        }
    }

    /// The scope portion of the filters, serialized canonically for cache
    /// keying. Date ranges are post-filters and deliberately excluded.
    pub fn scope_key(&self) -> String {
        serde_json::json!({
            "organization_id": self.organization_id,
            "entity_type": self.entity_type,
            "relation_type": self.relation_type,
            "topic_category": self.topic_category,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn conflicting_created_range_is_rejected() {
        let filters = SearchFilters {
            created_after: Some(ts(2025)),
            created_before: Some(ts(2024)),
            ..Default::default()
        };
        assert!(matches!(
            filters.validate(),
            Err(FilterError::ConflictingRange { field: "created" })
        ));
    }

    #[test]
    fn or_mode_passes_when_any_check_passes() {
        let record = GraphRecord::relation("r1", "reports_to", "")
            .with_timestamps(Some(ts(2023)), None);
        let filters = SearchFilters {
            created_after: Some(ts(2022)),
            updated_after: Some(ts(2024)),
            mode: FilterMode::Or,
            ..Default::default()
        };
        assert!(filters.matches_dates(&record));

        let and_filters = SearchFilters {
            mode: FilterMode::And,
            ..filters
        };
        assert!(!and_filters.matches_dates(&record));
    }

    #[test]
    fn scope_key_ignores_date_ranges() {
        let a = SearchFilters {
            organization_id: Some("org-1".to_string()),
            created_after: Some(ts(2024)),
            ..Default::default()
        };
        let b = SearchFilters {
            organization_id: Some("org-1".to_string()),
            ..Default::default()
        };
        assert_eq!(a.scope_key(), b.scope_key());
    }
}
