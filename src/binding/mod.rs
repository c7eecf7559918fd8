//! # Role Bindings
//!
//! Static mapping from group rank numbers to Discord role names, and the
//! diff engine that reconciles a member's live role set against it.
//!
//! ## Invariants
//! - BIND-1: A rank with no binding maps to the empty role set
//! - BIND-2: Only roles in the managed set are ever added or removed
//! - BIND-3: Duplicate rank keys are rejected at startup, never
//!   silently resolved last-write-wins

mod diff;
mod table;

pub use diff::RoleDiff;
pub use table::{default_bindings, RoleBindingTable};
