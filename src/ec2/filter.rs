//! Target fleet selection filters.

use aws_sdk_ec2::types::Filter;
use tracing::debug;

use crate::error::{PauserError, Result};

/// Tags every pausable instance must carry.
const BUILTIN_TAG_CONSTRAINTS: &[(&str, &str)] = &[("Ephemeral", "False"), ("Pausable", "True")];

/// Lifecycle states eligible for resolution when the state filter is enabled.
pub const RESOLVABLE_STATES: &[&str] = &[
    "pending",
    "running",
    "shutting-down",
    "stopping",
    "stopped",
];

/// A single tag equality constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConstraint {
    pub key: String,
    pub value: String,
}

/// Instance selection predicate sent to DescribeInstances.
///
/// All constraints are ANDed by the API. The state allowlist is policy:
/// the stricter invocation mode enables it, `--any-state` drops it.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub tag_constraints: Vec<TagConstraint>,
    pub include_state_filter: bool,
    pub id_allowlist: Option<Vec<String>>,
}

impl FilterSpec {
    /// Build the selection predicate from the built-in constraints plus
    /// user-supplied tag and instance-id overrides.
    pub fn build(
        include_state_filter: bool,
        extra_tags: &[String],
        ids: &[String],
    ) -> Result<Self> {
        let mut tag_constraints: Vec<TagConstraint> = BUILTIN_TAG_CONSTRAINTS
            .iter()
            .map(|(key, value)| TagConstraint {
                key: (*key).to_string(),
                value: (*value).to_string(),
            })
            .collect();

        for entry in extra_tags {
            let constraint = parse_tag_entry(entry)?;
            debug!(
                tag_key = %constraint.key,
                tag_value = %constraint.value,
                "Adding tag filter"
            );
            tag_constraints.push(constraint);
        }

        let id_allowlist = if ids.is_empty() {
            None
        } else {
            Some(ids.to_vec())
        };

        Ok(Self {
            tag_constraints,
            include_state_filter,
            id_allowlist,
        })
    }

    /// Render the constraint set as EC2 API filters.
    pub fn to_filters(&self) -> Vec<Filter> {
        let mut filters: Vec<Filter> = self
            .tag_constraints
            .iter()
            .map(|c| {
                Filter::builder()
                    .name(format!("tag:{}", c.key))
                    .values(c.value.as_str())
                    .build()
            })
            .collect();

        if self.include_state_filter {
            filters.push(
                Filter::builder()
                    .name("instance-state-name")
                    .set_values(Some(
                        RESOLVABLE_STATES.iter().map(|s| (*s).to_string()).collect(),
                    ))
                    .build(),
            );
        }

        filters
    }
}

/// Split a `Key=Value` entry, rejecting anything without exactly one `=`.
fn parse_tag_entry(entry: &str) -> Result<TagConstraint> {
    let parts: Vec<&str> = entry.split('=').collect();
    if parts.len() != 2 {
        return Err(PauserError::InvalidTagFilter(entry.to_string()));
    }

    Ok(TagConstraint {
        key: parts[0].to_string(),
        value: parts[1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(key: &str, value: &str) -> TagConstraint {
        TagConstraint {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_builtin_constraints_always_present() {
        let spec = FilterSpec::build(true, &[], &[]).unwrap();
        assert_eq!(
            spec.tag_constraints,
            vec![constraint("Ephemeral", "False"), constraint("Pausable", "True")]
        );
        assert!(spec.id_allowlist.is_none());
    }

    #[test]
    fn test_one_constraint_per_entry_preserving_key_value_verbatim() {
        let tags = vec!["Name=fu".to_string(), "Environment=bar".to_string()];
        let spec = FilterSpec::build(true, &tags, &[]).unwrap();
        assert_eq!(
            spec.tag_constraints[2..],
            [constraint("Name", "fu"), constraint("Environment", "bar")]
        );
    }

    #[test]
    fn test_entry_without_equals_is_rejected() {
        let tags = vec!["Name".to_string()];
        let err = FilterSpec::build(true, &tags, &[]).unwrap_err();
        assert!(matches!(err, PauserError::InvalidTagFilter(ref entry) if entry == "Name"));
    }

    #[test]
    fn test_entry_with_two_equals_is_rejected() {
        let tags = vec!["Name=fu=bar".to_string()];
        let err = FilterSpec::build(true, &tags, &[]).unwrap_err();
        assert!(matches!(err, PauserError::InvalidTagFilter(_)));
    }

    #[test]
    fn test_empty_key_or_value_is_kept_verbatim() {
        let tags = vec!["Team=".to_string(), "=orphan".to_string()];
        let spec = FilterSpec::build(true, &tags, &[]).unwrap();
        assert_eq!(
            spec.tag_constraints[2..],
            [constraint("Team", ""), constraint("", "orphan")]
        );
    }

    #[test]
    fn test_ids_kept_in_order_without_dedup() {
        let ids = vec!["i-1".to_string(), "i-2".to_string(), "i-1".to_string()];
        let spec = FilterSpec::build(true, &[], &ids).unwrap();
        assert_eq!(spec.id_allowlist, Some(ids));
    }

    #[test]
    fn test_to_filters_includes_state_allowlist_when_enabled() {
        let spec = FilterSpec::build(true, &[], &[]).unwrap();
        let filters = spec.to_filters();

        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0].name(), Some("tag:Ephemeral"));
        assert_eq!(filters[0].values(), ["False"]);
        assert_eq!(filters[1].name(), Some("tag:Pausable"));
        assert_eq!(filters[1].values(), ["True"]);
        assert_eq!(filters[2].name(), Some("instance-state-name"));
        assert_eq!(filters[2].values(), RESOLVABLE_STATES);
    }

    #[test]
    fn test_to_filters_omits_state_allowlist_when_disabled() {
        let spec = FilterSpec::build(false, &[], &[]).unwrap();
        let filters = spec.to_filters();

        assert_eq!(filters.len(), 2);
        assert!(filters.iter().all(|f| f.name() != Some("instance-state-name")));
    }
}
