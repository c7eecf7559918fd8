//! Verification state machine tests.
//!
//! Covers the challenge lifecycle: issue, confirm, supersede, expiry
//! freshness, and the guarantee that failed lookups leave no pending
//! record.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};

use common::{bot, test_bindings, FakeMember, FakeRoblox};
use ranklink::error::BotError;
use ranklink::verify::{ChallengeStore, PendingChallenge, VerificationSession};

fn roblox_with_member() -> FakeRoblox {
    FakeRoblox::new()
        .with_account("CocoaBean", 777)
        .with_membership(777, 5, "Junior Barista", 1005)
}

fn session(api: &Arc<FakeRoblox>, store: &Arc<ChallengeStore>) -> VerificationSession<FakeRoblox> {
    VerificationSession::new(Arc::clone(api), Arc::clone(store))
}

#[tokio::test]
async fn begin_then_confirm_links_the_account() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    let code = session.begin("discord-1", "CocoaBean").await.unwrap();
    api.set_profile(777, &format!("hi! my code is {} :)", code));

    let link = session.confirm("discord-1").await.unwrap();
    assert_eq!(link.account_name, "CocoaBean");
    assert_eq!(link.account_id, 777);
    assert_eq!(link.membership.rank, 5);

    // CONFIRMED is terminal: the record is gone
    assert!(store.get("discord-1").is_none());
}

#[tokio::test]
async fn confirm_without_begin_fails() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    let result = session.confirm("discord-1").await;
    assert!(matches!(result, Err(BotError::NoPendingChallenge)));
}

#[tokio::test]
async fn confirm_fails_when_profile_lacks_the_code() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    session.begin("discord-1", "CocoaBean").await.unwrap();
    api.set_profile(777, "nothing to see here");

    let result = session.confirm("discord-1").await;
    assert!(matches!(result, Err(BotError::CodeNotFound)));

    // the challenge survives a failed confirm so the user can retry
    assert!(store.get("discord-1").is_some());
}

#[tokio::test]
async fn code_match_is_case_sensitive() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    let code = session.begin("discord-1", "CocoaBean").await.unwrap();
    api.set_profile(777, &code.to_lowercase());

    let result = session.confirm("discord-1").await;
    assert!(matches!(result, Err(BotError::CodeNotFound)));
}

#[tokio::test]
async fn second_begin_supersedes_the_first_code() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    let first_code = session.begin("discord-1", "CocoaBean").await.unwrap();
    api.set_profile(777, &first_code);

    let second_code = session.begin("discord-1", "CocoaBean").await.unwrap();
    assert_eq!(store.len(), 1);

    if first_code != second_code {
        let result = session.confirm("discord-1").await;
        assert!(matches!(result, Err(BotError::CodeNotFound)));
    }
}

#[tokio::test]
async fn failed_lookup_during_begin_leaves_no_record() {
    let api = Arc::new(
        FakeRoblox::new()
            .with_account("Outsider", 555), // exists but not in the group
    );
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    let result = session.begin("discord-1", "NoSuchUser").await;
    assert!(matches!(result, Err(BotError::AccountNotFound)));
    assert!(store.is_empty());

    let result = session.begin("discord-1", "Outsider").await;
    assert!(matches!(result, Err(BotError::NotInGroup)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn stale_challenge_fails_even_before_cleanup_fires() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    // a record past its TTL whose scheduled cleanup has not run yet
    store.insert(PendingChallenge {
        identity: "discord-1".to_string(),
        account_name: "CocoaBean".to_string(),
        account_id: 777,
        code: "ABCDEF".to_string(),
        issued_at: Utc::now() - Duration::minutes(11),
    });
    api.set_profile(777, "ABCDEF");

    let result = session.confirm("discord-1").await;
    assert!(matches!(result, Err(BotError::CodeNotFound)));
    assert!(store.get("discord-1").is_none());
}

#[tokio::test(start_paused = true)]
async fn scheduled_expiry_deletes_the_record() {
    let api = Arc::new(roblox_with_member());
    let store = Arc::new(ChallengeStore::new());
    let session = session(&api, &store);

    session.begin("discord-1", "CocoaBean").await.unwrap();
    assert!(store.get("discord-1").is_some());

    tokio::time::sleep(std::time::Duration::from_secs(601)).await;
    tokio::task::yield_now().await;

    assert!(store.get("discord-1").is_none());
}

#[tokio::test]
async fn confirm_verify_persists_link_and_assigns_roles() {
    let bot = bot(roblox_with_member(), test_bindings());
    let member = FakeMember::with_roles(&["Nitro Booster"]);

    let reply = bot.handler.verify("discord-1", "CocoaBean").await.unwrap();
    assert!(reply.footer.unwrap().contains("10 minutes"));

    let code = bot.challenges.get("discord-1").unwrap().code;
    bot.roblox.set_profile(777, &code);

    bot.handler
        .confirm_verify("discord-1", &member)
        .await
        .unwrap();

    assert_eq!(bot.registry.get("discord-1").as_deref(), Some("CocoaBean"));
    let roles = member.current_roles();
    assert!(roles.contains("Verified"));
    assert!(roles.contains("Barista"));
    assert!(roles.contains("Nitro Booster"));
}
