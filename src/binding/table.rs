//! Rank-to-role binding table.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{BotError, BotResult};

const NO_ROLES: &[String] = &[];

/// Immutable mapping from group rank to the Discord role names members at
/// that rank should hold. Built once at startup.
///
/// The union of every bound role name is the managed set: the only roles
/// reconciliation is allowed to touch. Roles a member holds outside the
/// managed set are invisible to this table.
#[derive(Debug, Clone)]
pub struct RoleBindingTable {
    bindings: BTreeMap<u8, Vec<String>>,
    managed: BTreeSet<String>,
}

impl RoleBindingTable {
    /// Build a table from `(rank, role names)` pairs.
    ///
    /// Fails with `DuplicateRankBinding` if the same rank appears twice;
    /// an operator assigning two different role lists to one rank is a
    /// configuration bug that must not be resolved by picking a winner.
    pub fn from_pairs<I>(pairs: I) -> BotResult<Self>
    where
        I: IntoIterator<Item = (u8, Vec<String>)>,
    {
        let mut bindings = BTreeMap::new();
        let mut managed = BTreeSet::new();

        for (rank, roles) in pairs {
            if bindings.contains_key(&rank) {
                return Err(BotError::DuplicateRankBinding { rank });
            }
            for role in &roles {
                managed.insert(role.clone());
            }
            bindings.insert(rank, roles);
        }

        Ok(Self { bindings, managed })
    }

    /// Role names a member at `rank` should hold, in binding order.
    /// Empty for an unbound rank.
    pub fn roles_for(&self, rank: u8) -> &[String] {
        self.bindings
            .get(&rank)
            .map(Vec::as_slice)
            .unwrap_or(NO_ROLES)
    }

    /// Union of all bound role names. Precomputed at construction.
    pub fn managed_roles(&self) -> &BTreeSet<String> {
        &self.managed
    }

    /// Number of bound ranks.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if no ranks are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// The production binding table.
///
/// Bound ranks are not contiguous: ranks 23..=254 are unbound and 255 is
/// the group holder.
pub fn default_bindings() -> BotResult<RoleBindingTable> {
    fn b(rank: u8, roles: &[&str]) -> (u8, Vec<String>) {
        (rank, roles.iter().map(|r| r.to_string()).collect())
    }

    RoleBindingTable::from_pairs([
        b(1, &["Verified", "Sweetsiez Supporter"]),
        b(2, &["Verified", "Noted Customer"]),
        b(3, &["Verified", "Allied Representative"]),
        b(4, &["Verified", "Trainee"]),
        b(5, &["Verified", "Junior Barista", "LR Team"]),
        b(6, &["Verified", "Barista", "LR Team"]),
        b(7, &["Verified", "Senior Barista", "LR Team"]),
        b(8, &["Verified", "Staff Assistant", "LR Team"]),
        b(9, &["Verified", "Assistant Supervisor", "MR Team", "Low Response"]),
        b(10, &["Verified", "Supervisor", "MR Team", "Low Response", "Hosting"]),
        b(
            11,
            &[
                "Verified",
                "Assistant Manager",
                "MR Team",
                "Low Response",
                "Medium Response",
                "Hosting",
                "LR Ranking",
            ],
        ),
        b(
            12,
            &[
                "Verified",
                "General Manager",
                "MR Team",
                "Low Response",
                "Medium Response",
                "Hosting",
                "LR Ranking",
                "Pbanning",
            ],
        ),
        b(
            13,
            &[
                "Verified",
                "Executive Assistant",
                "HR Team",
                "High Response",
                "Hosting",
                "LR Ranking",
                "Pbanning",
            ],
        ),
        b(
            14,
            &[
                "Verified",
                "Public Relations Director",
                "HR Team",
                "High Response",
                "Pbanning",
                "Public Relations",
            ],
        ),
        b(
            15,
            &[
                "Verified",
                "Human Resources Director",
                "HR Team",
                "High Response",
                "Pbanning",
                "Human Resources",
            ],
        ),
        b(16, &["Verified", "Managing Director", "HR Team", "High Response", "Pbanning"]),
        b(17, &["Verified", "Developer", "Development Team"]),
        b(
            18,
            &[
                "Verified",
                "Executive Director",
                "HR Team",
                "Executive Team",
                "High Response",
                "Pbanning",
            ],
        ),
        b(19, &["Verified", "Vice President", "Executive Team", "Leadership Team"]),
        b(20, &["Verified", "President", "Executive Team", "Leadership Team"]),
        b(21, &["Verified", "Vice Chairperson", "Executive Team", "Leadership Team"]),
        b(22, &["Verified", "Chairperson", "Executive Team", "Leadership Team"]),
        b(255, &["Verified", "Group Holder", "Executive Team", "Leadership Team"]),
    ])
}
