//! # Account Verification
//!
//! Bio-code challenge protocol proving ownership of a Roblox account.
//!
//! A challenge moves `NONE → PENDING → (CONFIRMED | EXPIRED | SUPERSEDED)`;
//! every terminal state deletes the record, so at most one pending
//! challenge exists per identity at any instant.
//!
//! ## Invariants
//! - VER-1: one pending challenge per identity
//! - VER-2: confirm re-validates freshness from `issued_at`; it never
//!   relies on the scheduled cleanup having fired
//! - VER-3: a failed external lookup during `begin` leaves no record

mod code;
mod session;
mod store;

pub use code::generate_code;
pub use session::{ConfirmedLink, VerificationSession, CHALLENGE_TTL_SECS};
pub use store::{ChallengeStore, PendingChallenge};
