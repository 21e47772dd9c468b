//! Rules applied when an orchestrator agent creates tasks for others.
//!
//! An orchestrator must never end up assigned to a task it created as a
//! side effect of the creation defaults: it is stripped from the assignee
//! list and cannot request a status that implies it picked the task up.

use serde_json::Value;

use crate::{AgentId, TaskStatus};

/// Resolve the status a creation request asked for.
///
/// Returns `None` when `candidate` is not a string or not a known status;
/// the caller then falls back to its own default. Orchestrators asking for
/// `assigned` or `in_progress` get `inbox` instead.
pub fn normalize_requested_status(candidate: &Value, is_orchestrator: bool) -> Option<TaskStatus> {
    let status: TaskStatus = candidate.as_str()?.parse().ok()?;

    if is_orchestrator && matches!(status, TaskStatus::Assigned | TaskStatus::InProgress) {
        return Some(TaskStatus::Inbox);
    }

    Some(status)
}

/// Drop the requester from `assignees` when it is the orchestrator.
///
/// Order of the remaining ids is preserved. The caller's slice is never
/// touched.
pub fn filter_assignees(
    assignees: &[AgentId],
    requester: &AgentId,
    is_orchestrator: bool,
) -> Vec<AgentId> {
    if !is_orchestrator {
        return assignees.to_vec();
    }

    assignees
        .iter()
        .filter(|id| *id != requester)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn ids(raw: &[&str]) -> Vec<AgentId> {
        raw.iter().map(|s| AgentId::new(*s)).collect()
    }

    #[test]
    fn test_non_string_candidates_are_unset() {
        for candidate in [json!(null), json!(3), json!(true), json!(["inbox"]), json!({"s": "inbox"})] {
            assert_eq!(normalize_requested_status(&candidate, false), None);
            assert_eq!(normalize_requested_status(&candidate, true), None);
        }
    }

    #[test]
    fn test_unknown_status_string_is_unset() {
        assert_eq!(normalize_requested_status(&json!("todo"), true), None);
        assert_eq!(normalize_requested_status(&json!("Inbox"), false), None);
        assert_eq!(normalize_requested_status(&json!(""), false), None);
    }

    #[test]
    fn test_orchestrator_cannot_self_assign() {
        assert_eq!(
            normalize_requested_status(&json!("assigned"), true),
            Some(TaskStatus::Inbox)
        );
        assert_eq!(
            normalize_requested_status(&json!("in_progress"), true),
            Some(TaskStatus::Inbox)
        );
    }

    #[test]
    fn test_specialist_status_passes_through() {
        assert_eq!(
            normalize_requested_status(&json!("assigned"), false),
            Some(TaskStatus::Assigned)
        );
        assert_eq!(
            normalize_requested_status(&json!("in_progress"), false),
            Some(TaskStatus::InProgress)
        );
    }

    #[test]
    fn test_filter_removes_every_requester_occurrence() {
        let requester = AgentId::new("A");
        let input = ids(&["A", "B", "A", "C"]);
        assert_eq!(filter_assignees(&input, &requester, true), ids(&["B", "C"]));
        // caller's list untouched
        assert_eq!(input, ids(&["A", "B", "A", "C"]));
    }

    #[test]
    fn test_filter_empty_list() {
        let requester = AgentId::new("A");
        assert!(filter_assignees(&[], &requester, true).is_empty());
        assert!(filter_assignees(&[], &requester, false).is_empty());
    }

    proptest! {
        #[test]
        fn prop_other_statuses_unchanged(idx in 0usize..7, orchestrator in any::<bool>()) {
            let status = TaskStatus::ALL[idx];
            let expected = if orchestrator
                && matches!(status, TaskStatus::Assigned | TaskStatus::InProgress)
            {
                TaskStatus::Inbox
            } else {
                status
            };
            prop_assert_eq!(
                normalize_requested_status(&json!(status.as_str()), orchestrator),
                Some(expected)
            );
        }

        #[test]
        fn prop_arbitrary_strings_outside_set_are_unset(s in "[A-Za-z_ ]{0,16}") {
            prop_assume!(s.parse::<TaskStatus>().is_err());
            prop_assert_eq!(normalize_requested_status(&json!(s), true), None);
        }

        #[test]
        fn prop_filter_is_identity_for_non_orchestrator(
            raw in proptest::collection::vec("[a-c]", 0..8),
            requester in "[a-c]",
        ) {
            let input: Vec<AgentId> = raw.iter().map(|s| AgentId::new(s.as_str())).collect();
            let requester = AgentId::new(requester);
            prop_assert_eq!(filter_assignees(&input, &requester, false), input);
        }

        #[test]
        fn prop_filter_keeps_order_of_others(
            raw in proptest::collection::vec("[a-c]", 0..8),
            requester in "[a-c]",
        ) {
            let input: Vec<AgentId> = raw.iter().map(|s| AgentId::new(s.as_str())).collect();
            let requester = AgentId::new(requester);
            let expected: Vec<AgentId> = input.iter().filter(|id| **id != requester).cloned().collect();
            prop_assert_eq!(filter_assignees(&input, &requester, true), expected);
        }
    }
}
