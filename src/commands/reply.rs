//! User-visible command replies.

use crate::error::BotError;

/// How the gateway adapter should present a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Info,
    Error,
}

/// A structured reply: a title plus labelled fields, rendered by the
/// gateway adapter as an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub footer: Option<String>,
}

impl Reply {
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ReplyKind::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ReplyKind::Info, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ReplyKind::Error, title)
    }

    fn new(kind: ReplyKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields: Vec::new(),
            footer: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }
}

/// Translate a domain error into the reply shown to the user.
///
/// `RoleMutationFailed` reports the portion of the diff that did apply;
/// everything else maps straight to its display message.
pub fn render_error(err: &BotError) -> Reply {
    match err {
        BotError::RoleMutationFailed { added, removed } => {
            let mut reply = Reply::error("Role update partially applied");
            if !removed.is_empty() {
                reply = reply.field("Roles Removed", removed.join(", "));
            }
            if !added.is_empty() {
                reply = reply.field("Roles Added", added.join(", "));
            }
            reply.footer("The remaining changes were not applied. Try /update again.")
        }
        other => Reply::error(other.to_string()),
    }
}
