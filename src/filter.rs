//! Optional country/platform narrowing applied before aggregation.
//!
//! The upstream job filters with anchored regex matches (`ios` against
//! `os_name`, `FR` against `country`), which on literal patterns is a prefix
//! match. The aggregation core has no opinion on filtering policy; this
//! collaborator just applies whatever the configuration asks for.

use crate::records::Observation;

/// Which dimensions to narrow on. An unset dimension is unconstrained.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub country: Option<String>,
    pub os_name: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.os_name.is_none()
    }

    /// Prefix match on each configured dimension.
    pub fn matches(&self, obs: &Observation) -> bool {
        self.country
            .as_deref()
            .is_none_or(|c| obs.country.starts_with(c))
            && self
                .os_name
                .as_deref()
                .is_none_or(|o| obs.os_name.starts_with(o))
    }
}

/// Retains only the observations matching `spec`.
pub fn apply_filter(records: Vec<Observation>, spec: &FilterSpec) -> Vec<Observation> {
    if spec.is_empty() {
        return records;
    }
    records.into_iter().filter(|o| spec.matches(o)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(country: &str, os_name: &str) -> Observation {
        Observation {
            name: "app".to_string(),
            value: 1,
            year_week: "2024-W01".to_string(),
            country: country.to_string(),
            os_name: os_name.to_string(),
        }
    }

    #[test]
    fn test_empty_spec_keeps_everything() {
        let records = vec![obs("FR", "ios"), obs("DE", "android")];
        let out = apply_filter(records.clone(), &FilterSpec::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_prefix_match_not_equality() {
        let spec = FilterSpec {
            country: None,
            os_name: Some("ios".to_string()),
        };
        // "ios-16" matches the "ios" prefix the way re.match would.
        assert!(spec.matches(&obs("FR", "ios-16")));
        assert!(!spec.matches(&obs("FR", "android")));
    }

    #[test]
    fn test_both_dimensions_must_match() {
        let spec = FilterSpec {
            country: Some("FR".to_string()),
            os_name: Some("ios".to_string()),
        };
        let records = vec![obs("FR", "ios"), obs("FR", "android"), obs("DE", "ios")];
        let out = apply_filter(records, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "FR");
        assert_eq!(out[0].os_name, "ios");
    }
}
