//! Role reconciliation diff.
//!
//! Pure computation: given the roles a member currently holds and a target
//! rank, produce the minimal add/remove sets that move the member onto the
//! bound role set for that rank without touching any unmanaged role.

use std::collections::BTreeSet;

use super::table::RoleBindingTable;

/// Minimal set operations needed to move a member's current roles to the
/// target set for a rank.
///
/// Callers apply `to_remove` before `to_add`. Applying both to the current
/// set yields exactly `(current − managed) ∪ roles_for(rank)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleDiff {
    pub to_add: BTreeSet<String>,
    pub to_remove: BTreeSet<String>,
}

impl RoleDiff {
    /// True if the member already holds exactly the target managed roles.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

impl RoleBindingTable {
    /// Compute the add/remove diff for a member at `rank`.
    ///
    /// - `to_add`: bound roles for `rank` the member lacks
    /// - `to_remove`: managed roles the member holds that are not bound
    ///   for `rank`
    ///
    /// Roles outside the managed set never appear in either side.
    pub fn reconcile(&self, current: &BTreeSet<String>, rank: u8) -> RoleDiff {
        let target: BTreeSet<&str> = self.roles_for(rank).iter().map(String::as_str).collect();

        let to_add = target
            .iter()
            .filter(|role| !current.contains(**role))
            .map(|role| role.to_string())
            .collect();

        let to_remove = current
            .iter()
            .filter(|role| self.managed_roles().contains(*role) && !target.contains(role.as_str()))
            .cloned()
            .collect();

        RoleDiff { to_add, to_remove }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RoleBindingTable {
        RoleBindingTable::from_pairs([
            (1, vec!["Verified".to_string()]),
            (2, vec!["Verified".to_string(), "Staff".to_string()]),
            (3, vec!["Verified".to_string(), "Manager".to_string()]),
        ])
        .unwrap()
    }

    fn set(roles: &[&str]) -> BTreeSet<String> {
        roles.iter().map(|r| r.to_string()).collect()
    }

    fn apply(current: &BTreeSet<String>, diff: &RoleDiff) -> BTreeSet<String> {
        let mut result = current.clone();
        for role in &diff.to_remove {
            result.remove(role);
        }
        for role in &diff.to_add {
            result.insert(role.clone());
        }
        result
    }

    #[test]
    fn empty_current_set_adds_full_binding() {
        let table = table();
        let diff = table.reconcile(&BTreeSet::new(), 2);
        assert_eq!(diff.to_add, set(&["Verified", "Staff"]));
        assert!(diff.to_remove.is_empty());
    }

    #[test]
    fn unmanaged_roles_are_preserved() {
        let table = table();
        let current = set(&["Nitro Booster", "Staff", "Verified"]);
        let diff = table.reconcile(&current, 3);

        assert_eq!(diff.to_add, set(&["Manager"]));
        assert_eq!(diff.to_remove, set(&["Staff"]));
        assert_eq!(
            apply(&current, &diff),
            set(&["Nitro Booster", "Verified", "Manager"])
        );
    }

    #[test]
    fn unbound_rank_strips_all_managed_roles() {
        let table = table();
        let current = set(&["Verified", "Staff", "Event Winner"]);
        let diff = table.reconcile(&current, 200);

        assert!(diff.to_add.is_empty());
        assert_eq!(diff.to_remove, set(&["Verified", "Staff"]));
        assert_eq!(apply(&current, &diff), set(&["Event Winner"]));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let table = table();
        let current = set(&["Verified", "Manager", "Birthday"]);
        let diff = table.reconcile(&current, 2);
        let settled = apply(&current, &diff);

        let second = table.reconcile(&settled, 2);
        assert!(second.is_empty());
    }

    #[test]
    fn diff_never_reaches_outside_managed_set() {
        let table = table();
        let current = set(&["Unrelated A", "Unrelated B", "Verified"]);
        let diff = table.reconcile(&current, 1);

        for role in diff.to_add.iter().chain(diff.to_remove.iter()) {
            assert!(table.managed_roles().contains(role));
        }
        for role in &diff.to_remove {
            assert!(current.contains(role));
        }
    }
}
