//! Access Control Integration Tests
//!
//! Registration, QR rotation, and door verdicts wired through the
//! application handlers and the in-memory adapters. Covers:
//!
//! - A rotated token stops opening the door at once
//! - QR entry and manual front-desk entry give the same verdict
//! - The last day of a membership is still a valid day
//! - Every entry attempt lands in the audit log

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use gymgate::adapters::memory::{
    InMemoryAccessLogRepository, InMemoryAccessTokenRepository, InMemoryMemberRepository,
};
use gymgate::application::handlers::access::{
    AccessTokenService, AccessVerifier, ListAccessLogHandler, ListAccessLogQuery,
    ManualIdentifier, RotateTokenCommand, RotateTokenHandler,
};
use gymgate::application::handlers::member::{
    RegisterMemberCommand, RegisterMemberHandler, RegisterMemberResult, UpdateMemberCommand,
    UpdateMemberHandler,
};
use gymgate::domain::access::{AccessChannel, VerdictReason};
use gymgate::domain::foundation::{AuthenticatedUser, GymClock, Role, UserId};
use gymgate::domain::membership::{MemberChanges, MemberStatus};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn recepcion() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new("desk-1").unwrap(), Role::Recepcion)
}

fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new("admin-1").unwrap(), Role::Admin)
}

struct Door {
    members: Arc<InMemoryMemberRepository>,
    log: Arc<InMemoryAccessLogRepository>,
    tokens: AccessTokenService,
    verifier: AccessVerifier,
}

impl Door {
    fn new() -> Self {
        let members = Arc::new(InMemoryMemberRepository::new());
        let log = Arc::new(InMemoryAccessLogRepository::new());
        let tokens = AccessTokenService::new(Arc::new(InMemoryAccessTokenRepository::new()));
        let verifier = AccessVerifier::new(
            tokens.clone(),
            members.clone(),
            log.clone(),
            GymClock::pinned(today()),
        );
        Self {
            members,
            log,
            tokens,
            verifier,
        }
    }

    async fn register(&self, documento: &str, expires_on: NaiveDate) -> RegisterMemberResult {
        RegisterMemberHandler::new(self.members.clone(), self.tokens.clone())
            .handle(RegisterMemberCommand {
                actor: recepcion(),
                documento: documento.to_string(),
                nombre: "Socia de prueba".to_string(),
                expires_on,
                plan: Some("mensual".to_string()),
            })
            .await
            .unwrap()
    }

    async fn set_status(&self, registered: &RegisterMemberResult, status: MemberStatus) {
        UpdateMemberHandler::new(self.members.clone())
            .handle(UpdateMemberCommand {
                actor: admin(),
                member_id: registered.member.id,
                changes: MemberChanges {
                    status: Some(status),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
    }

    async fn log_size(&self) -> usize {
        ListAccessLogHandler::new(self.log.clone())
            .handle(ListAccessLogQuery {
                actor: recepcion(),
                member_id: None,
                limit: Some(500),
            })
            .await
            .unwrap()
            .len()
    }
}

fn next_month() -> NaiveDate {
    today() + Days::new(30)
}

// =============================================================================
// Token Rotation
// =============================================================================

#[tokio::test]
async fn rotation_invalidates_the_previous_token() {
    let door = Door::new();
    let registered = door.register("27111222", next_month()).await;
    let old = registered.token.token.as_str().to_string();

    assert!(door.verifier.verify(&old).await.permitted);

    let rotated = RotateTokenHandler::new(door.members.clone(), door.tokens.clone())
        .handle(RotateTokenCommand {
            actor: recepcion(),
            member_id: registered.member.id,
        })
        .await
        .unwrap();

    let stale = door.verifier.verify(&old).await;
    assert!(!stale.permitted);
    assert_eq!(stale.reason, VerdictReason::TokenInvalid);
    assert!(stale.member.is_none());

    let fresh = door.verifier.verify(rotated.token.as_str()).await;
    assert!(fresh.permitted);
    assert_eq!(fresh.member_id(), Some(registered.member.id));
}

#[tokio::test]
async fn member_can_rotate_own_token_but_not_anothers() {
    let door = Door::new();
    let ana = door.register("27111222", next_month()).await;
    let bruno = door.register("27333444", next_month()).await;
    let handler = RotateTokenHandler::new(door.members.clone(), door.tokens.clone());

    let as_ana = AuthenticatedUser::new(UserId::new("ana").unwrap(), Role::Socio)
        .with_member(ana.member.id);

    assert!(handler
        .handle(RotateTokenCommand {
            actor: as_ana.clone(),
            member_id: ana.member.id,
        })
        .await
        .is_ok());
    assert!(handler
        .handle(RotateTokenCommand {
            actor: as_ana,
            member_id: bruno.member.id,
        })
        .await
        .is_err());

    // Bruno's original token was left alone.
    assert!(door.verifier.verify(bruno.token.token.as_str()).await.permitted);
}

// =============================================================================
// Entry Paths
// =============================================================================

#[tokio::test]
async fn suspended_member_is_denied_the_same_way_on_both_paths() {
    let door = Door::new();
    let registered = door.register("27111222", next_month()).await;
    door.set_status(&registered, MemberStatus::Suspended).await;

    let by_qr = door.verifier.enter(registered.token.token.as_str()).await;
    let by_id = door
        .verifier
        .register_access(&ManualIdentifier::MemberId(registered.member.id))
        .await;
    let by_documento = door
        .verifier
        .register_access(&ManualIdentifier::Documento("27111222".to_string()))
        .await;

    for outcome in [&by_qr, &by_id, &by_documento] {
        assert!(!outcome.verdict.permitted);
        assert_eq!(outcome.verdict.reason, VerdictReason::Suspended);
        assert!(outcome.logged);
    }
    assert_eq!(by_qr.verdict, by_id.verdict);
    assert_eq!(by_id.verdict, by_documento.verdict);
}

#[tokio::test]
async fn membership_is_valid_through_its_last_day() {
    let door = Door::new();
    let last_day = door.register("27000001", today()).await;
    let lapsed = door.register("27000002", today() - Days::new(1)).await;

    let on_last_day = door.verifier.verify(last_day.token.token.as_str()).await;
    assert!(on_last_day.permitted);
    assert_eq!(on_last_day.member.as_ref().map(|m| m.days_to_expiry), Some(0));

    let after = door.verifier.verify(lapsed.token.token.as_str()).await;
    assert!(!after.permitted);
    assert_eq!(after.reason, VerdictReason::Expired);
    assert_eq!(after.reason.code(), "MEMBERSHIP_EXPIRED");
}

#[tokio::test]
async fn suspension_outranks_expiry() {
    let door = Door::new();
    let registered = door.register("27111222", today() - Days::new(10)).await;
    door.set_status(&registered, MemberStatus::Suspended).await;

    let verdict = door.verifier.verify(registered.token.token.as_str()).await;

    assert_eq!(verdict.reason, VerdictReason::Suspended);
}

#[tokio::test]
async fn unknown_identifiers_are_denied_and_logged() {
    let door = Door::new();

    let qr = door.verifier.enter("c2FsdGVkLWJ1dC1ub3QtaXNzdWVk").await;
    let manual = door
        .verifier
        .register_access(&ManualIdentifier::Documento("00000000".to_string()))
        .await;

    assert_eq!(qr.verdict.reason, VerdictReason::TokenInvalid);
    assert_eq!(manual.verdict.reason, VerdictReason::MemberNotFound);
    assert_eq!(door.log_size().await, 2);
}

#[tokio::test]
async fn verify_is_a_dry_run_and_enter_is_audited() {
    let door = Door::new();
    let registered = door.register("27111222", next_month()).await;
    let token = registered.token.token.as_str();

    door.verifier.verify(token).await;
    assert_eq!(door.log_size().await, 0);

    door.verifier.enter(token).await;
    door.verifier
        .register_access(&ManualIdentifier::MemberId(registered.member.id))
        .await;

    let entries = ListAccessLogHandler::new(door.log.clone())
        .handle(ListAccessLogQuery {
            actor: recepcion(),
            member_id: Some(registered.member.id),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.permitted));
    let channels: Vec<_> = entries.iter().map(|e| e.channel).collect();
    assert!(channels.contains(&AccessChannel::Qr));
    assert!(channels.contains(&AccessChannel::Manual));
}

// =============================================================================
// Property: Path Equivalence
// =============================================================================

fn any_status() -> impl Strategy<Value = MemberStatus> {
    prop_oneof![
        Just(MemberStatus::Active),
        Just(MemberStatus::Inactive),
        Just(MemberStatus::Suspended),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn qr_and_manual_entry_always_agree(
        status in any_status(),
        offset_days in -60i64..60,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (qr, manual) = runtime.block_on(async {
            let door = Door::new();
            let expires_on = if offset_days >= 0 {
                today() + Days::new(offset_days as u64)
            } else {
                today() - Days::new(offset_days.unsigned_abs())
            };
            let registered = door.register("27555666", expires_on).await;
            if status != MemberStatus::Active {
                door.set_status(&registered, status).await;
            }

            let qr = door.verifier.enter(registered.token.token.as_str()).await;
            let manual = door
                .verifier
                .register_access(&ManualIdentifier::MemberId(registered.member.id))
                .await;
            (qr.verdict, manual.verdict)
        });

        prop_assert_eq!(&qr, &manual);
        prop_assert_eq!(
            qr.permitted,
            status == MemberStatus::Active && offset_days >= 0
        );
    }
}
