//! Roblox HTTP client.
//!
//! Thin reqwest wrapper over the handful of endpoints the bot needs.
//! Authenticated writes use the `.ROBLOSECURITY` cookie plus a CSRF token
//! obtained from the token handshake (a POST to the auth endpoint that is
//! expected to be rejected, carrying the token in a response header).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{BotError, BotResult};
use crate::rank::RankEntry;

use super::{Membership, RobloxApi};

const USERS_API: &str = "https://users.roblox.com";
const GROUPS_API: &str = "https://groups.roblox.com";
const AUTH_API: &str = "https://auth.roblox.com";
const CSRF_HEADER: &str = "x-csrf-token";

/// Concrete Roblox API client for one group.
pub struct RobloxClient {
    http: reqwest::Client,
    group_id: u64,
    cookie: String,
}

#[derive(Deserialize)]
struct UsernameLookupResponse {
    data: Vec<UsernameLookupEntry>,
}

#[derive(Deserialize)]
struct UsernameLookupEntry {
    id: u64,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    description: Option<String>,
}

#[derive(Deserialize)]
struct UserGroupsResponse {
    data: Vec<UserGroupEntry>,
}

#[derive(Deserialize)]
struct UserGroupEntry {
    group: GroupRef,
    role: GroupRole,
}

#[derive(Deserialize)]
struct GroupRef {
    id: u64,
}

#[derive(Deserialize)]
struct GroupRole {
    id: u64,
    name: String,
    rank: u8,
}

#[derive(Deserialize)]
struct GroupRolesResponse {
    roles: Vec<GroupRole>,
}

impl RobloxClient {
    pub fn new(group_id: u64, cookie: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            group_id,
            cookie,
        }
    }

    fn cookie_header(&self) -> String {
        format!(".ROBLOSECURITY={}", self.cookie)
    }

    /// Fetch a CSRF token for authenticated writes.
    ///
    /// The auth endpoint rejects the empty login but returns the token in
    /// a header on the rejection.
    async fn fetch_csrf_token(&self) -> BotResult<String> {
        let response = self
            .http
            .post(format!("{}/v1/login", AUTH_API))
            .header(reqwest::header::COOKIE, self.cookie_header())
            .json(&json!({}))
            .send()
            .await?;

        response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| BotError::Transport("no CSRF token in auth response".to_string()))
    }
}

#[async_trait]
impl RobloxApi for RobloxClient {
    async fn resolve_account_id(&self, account_name: &str) -> BotResult<Option<u64>> {
        let response = self
            .http
            .post(format!("{}/v1/usernames/users", USERS_API))
            .json(&json!({ "usernames": [account_name] }))
            .send()
            .await?
            .error_for_status()?;

        let body: UsernameLookupResponse = response.json().await?;
        Ok(body.data.first().map(|entry| entry.id))
    }

    async fn fetch_profile_text(&self, account_id: u64) -> BotResult<Option<String>> {
        let response = self
            .http
            .get(format!("{}/v1/users/{}", USERS_API, account_id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: UserInfoResponse = response.error_for_status()?.json().await?;
        Ok(body.description)
    }

    async fn fetch_membership(&self, account_id: u64) -> BotResult<Option<Membership>> {
        let response = self
            .http
            .get(format!("{}/v1/users/{}/groups/roles", GROUPS_API, account_id))
            .send()
            .await?
            .error_for_status()?;

        let body: UserGroupsResponse = response.json().await?;
        Ok(body
            .data
            .into_iter()
            .find(|entry| entry.group.id == self.group_id)
            .map(|entry| Membership {
                rank: entry.role.rank,
                role_name: entry.role.name,
                role_id: entry.role.id,
            }))
    }

    async fn fetch_rank_entries(&self) -> BotResult<Vec<RankEntry>> {
        let response = self
            .http
            .get(format!("{}/v1/groups/{}/roles", GROUPS_API, self.group_id))
            .header(reqwest::header::COOKIE, self.cookie_header())
            .send()
            .await?
            .error_for_status()?;

        let body: GroupRolesResponse = response.json().await?;
        Ok(body
            .roles
            .into_iter()
            .map(|role| RankEntry {
                rank: role.rank,
                role_id: role.id,
                role_name: role.name,
            })
            .collect())
    }

    async fn set_member_role(&self, account_id: u64, role_id: u64) -> BotResult<bool> {
        let csrf_token = self.fetch_csrf_token().await?;

        let response = self
            .http
            .patch(format!(
                "{}/v1/groups/{}/users/{}",
                GROUPS_API, self.group_id, account_id
            ))
            .header(reqwest::header::COOKIE, self.cookie_header())
            .header(CSRF_HEADER, csrf_token)
            .json(&json!({ "roleId": role_id }))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
