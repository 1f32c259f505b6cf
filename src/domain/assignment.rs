//! Employee ↔ customer assignment sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Result of replacing an employee's customer set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SyncOutcome {
    pub attached: Vec<Uuid>,
    pub detached: Vec<Uuid>,
}

impl SyncOutcome {
    /// Set difference between what is linked now and what should be.
    pub fn plan(current: &BTreeSet<Uuid>, desired: &BTreeSet<Uuid>) -> Self {
        Self {
            attached: desired.difference(current).copied().collect(),
            detached: current.difference(desired).copied().collect(),
        }
    }
}

/// Body of `PUT /employees/{id}/customers`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AssignmentInput {
    #[serde(default)]
    pub customer_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        let mut v: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_plan_keeps_unchanged_pairs() {
        let c = ids(3);
        let current: BTreeSet<Uuid> = [c[0], c[1]].into();
        let desired: BTreeSet<Uuid> = [c[1], c[2]].into();

        let outcome = SyncOutcome::plan(&current, &desired);

        assert_eq!(outcome.attached, vec![c[2]]);
        assert_eq!(outcome.detached, vec![c[0]]);
    }

    #[test]
    fn test_plan_empty_desired_detaches_everything() {
        let c = ids(2);
        let current: BTreeSet<Uuid> = c.iter().copied().collect();

        let outcome = SyncOutcome::plan(&current, &BTreeSet::new());

        assert!(outcome.attached.is_empty());
        assert_eq!(outcome.detached, c);
    }

    #[test]
    fn test_plan_same_set_is_noop() {
        let c = ids(2);
        let set: BTreeSet<Uuid> = c.into_iter().collect();
        assert_eq!(SyncOutcome::plan(&set, &set), SyncOutcome::default());
    }
}
