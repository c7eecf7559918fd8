//! # Command Boundary
//!
//! Handlers for the bot's slash commands. The gateway adapter parses the
//! interaction, calls a handler with the already-extracted inputs, and
//! renders the returned [`Reply`] as an embed.
//!
//! Every domain error is recovered here and translated into a
//! user-visible reply via [`render_error`]; nothing at this boundary
//! panics or crashes the process.

mod handler;
mod reply;

pub use handler::CommandHandler;
pub use reply::{render_error, Reply, ReplyKind};
