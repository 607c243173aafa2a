use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::structs::issue::Issue;

/// In-memory snapshot of the latest scan's issues, keyed by id.
///
/// `replace_all` swaps the whole map in one motion, so readers never observe
/// a half-written scan and ids from earlier scans stop resolving.
pub struct IssueStore {
    inner: RwLock<HashMap<String, Issue>>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Assigns every issue a fresh id and replaces the previous snapshot.
    /// Returns the stored issues in input order.
    pub fn replace_all(&self, issues: Vec<Issue>) -> Vec<Issue> {
        let mut map = HashMap::with_capacity(issues.len());
        let mut stored = Vec::with_capacity(issues.len());
        for mut issue in issues {
            let id = Uuid::new_v4().to_string();
            issue.id = Some(id.clone());
            map.insert(id, issue.clone());
            stored.push(issue);
        }

        *self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = map;
        stored
    }

    pub fn get(&self, id: &str) -> Option<Issue> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::severity::Severity;

    fn issue(title: &str) -> Issue {
        Issue {
            id: None,
            title: title.to_string(),
            description: String::new(),
            severity: Severity::Low,
            file_path: None,
            line: None,
            suggestion: String::new(),
            fix: None,
            vulnerability_type: None,
            enrichment: None,
        }
    }

    #[test]
    fn replace_all_assigns_unique_ids_in_input_order() {
        let store = IssueStore::new();
        let stored = store.replace_all(vec![issue("a"), issue("b"), issue("c")]);

        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].title, "a");
        assert_eq!(stored[2].title, "c");

        let ids: Vec<String> = stored.iter().filter_map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn get_returns_stored_issue_by_id() {
        let store = IssueStore::new();
        let stored = store.replace_all(vec![issue("finding")]);
        let id = stored[0].id.clone().unwrap();

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.title, "finding");
        assert!(store.get("no-such-id").is_none());
    }

    #[test]
    fn replace_all_invalidates_previous_ids() {
        let store = IssueStore::new();
        let first = store.replace_all(vec![issue("old")]);
        let old_id = first[0].id.clone().unwrap();

        store.replace_all(vec![issue("new")]);
        assert!(store.get(&old_id).is_none());
        assert_eq!(store.len(), 1);
    }
}
