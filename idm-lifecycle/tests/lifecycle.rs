//! Controller behavior against in-memory collaborators.
//!
//! Covers:
//! 1. copy isolation and unmodified re-selection
//! 2. rejected accept and delete without backend writes
//! 3. refused delete keeping the selection open
//! 4. update and create reconciliation into the collection
//! 5. deep links, scoped loads and missing scopes
//! 6. backend failures and timeouts

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use idm_lifecycle::memory::{BackendCall, MemoryNavigation, MemoryNotifier, MemoryResourceService};
use idm_lifecycle::{
    ActionOutcome, CommonGroupBehavior, ControllerConfig, LifecycleController, LifecycleError,
    LifecycleResult, ResourceService, SelectionState, UserBehavior, UserController,
};
use idm_org::{Actor, CommonGroup, Entity, NewPerson, Role, Scope, SessionContext, User};
use idm_rbac::PermissionEngine;

const COMMON_GROUP: &str = "CGAA00001";

fn scope() -> Scope {
    Scope::CommonGroup(COMMON_GROUP.into())
}

fn user(id: &str, first: &str, last: &str) -> User {
    User::new(first, last).with_identification(id).unwrap()
}

struct Harness {
    ctx: SessionContext,
    controller: UserController,
    service: Arc<MemoryResourceService<User>>,
    navigation: MemoryNavigation,
    notifier: MemoryNotifier,
}

async fn harness_with(
    role: Role,
    navigation: MemoryNavigation,
    config: ControllerConfig,
) -> Harness {
    let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Visitor));
    ctx.switch_common_group(COMMON_GROUP, role);

    let service = Arc::new(MemoryResourceService::<User>::new());
    service
        .seed(
            scope(),
            [user("1", "Ada", "Lovelace"), user("2", "Alan", "Turing")],
        )
        .await;
    let notifier = MemoryNotifier::new();

    let mut controller: UserController = LifecycleController::new(
        ctx.clone(),
        service.clone(),
        Arc::new(UserBehavior::new(PermissionEngine::new(ctx.clone()))),
        Arc::new(navigation.clone()),
        Arc::new(notifier.clone()),
        config,
    );
    controller.initialize().await.unwrap();

    Harness {
        ctx,
        controller,
        service,
        navigation,
        notifier,
    }
}

async fn harness(role: Role) -> Harness {
    harness_with(role, MemoryNavigation::new(), ControllerConfig::default()).await
}

#[tokio::test]
async fn test_select_then_accept_is_disabled() {
    let mut h = harness(Role::Manager).await;
    for entity in h.controller.collection().to_vec() {
        h.controller.select(&entity);
        assert!(h.controller.disable_accept(), "{}", entity.identification());
    }
}

#[tokio::test]
async fn test_selection_is_a_copy() {
    let mut h = harness(Role::Manager).await;
    let ada = h.controller.collection()[0].clone();

    let selected = h.controller.select(&ada);
    selected.first_name = "Augusta".into();
    selected.mail = Some("ada@example.org".into());

    assert_eq!(h.controller.collection()[0], ada);
    assert_eq!(h.controller.state(), SelectionState::Editing);
}

#[tokio::test]
async fn test_start_create_always_drafts() {
    let mut h = harness(Role::Visitor).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada);

    h.controller.start_create();
    assert!(h.controller.is_new());
    assert_eq!(h.controller.selected().identification(), "");
    assert_eq!(h.service.write_count().await, 0);
}

#[tokio::test]
async fn test_rejected_accept_skips_backend() {
    let mut h = harness(Role::Manager).await;
    h.controller.start_create();

    let outcome = h.controller.accept().await.unwrap();

    assert_eq!(outcome, ActionOutcome::Rejected);
    assert_eq!(h.service.write_count().await, 0);
    assert_eq!(h.controller.collection().len(), 2);
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.controller.selected(), &User::create_empty());
    assert!(!h.controller.detail_visible());
    assert!(!h.controller.is_new());
    assert!(h.controller.original().is_none());
    assert_eq!(h.controller.state(), SelectionState::Idle);
}

#[tokio::test]
async fn test_visitor_cannot_save_valid_edit() {
    let mut h = harness(Role::Visitor).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada).mail = Some("ada@example.org".into());

    assert!(h.controller.disable_accept());
    assert_eq!(h.controller.accept().await.unwrap(), ActionOutcome::Rejected);
    assert_eq!(h.service.write_count().await, 0);
    assert_eq!(h.controller.collection()[0], ada);
}

#[tokio::test]
async fn test_update_reconciles_in_place() {
    let mut h = harness(Role::Manager).await;
    let a = h.controller.collection()[0].clone();
    let b = h.controller.collection()[1].clone();

    h.controller.select(&b).mail = Some("alan@example.org".into());
    let outcome = h.controller.accept().await.unwrap();
    assert_eq!(outcome, ActionOutcome::Completed);

    let b_prime = h.service.records(&scope()).await[1].clone();
    assert_eq!(b_prime.identification(), "2");
    assert_eq!(h.controller.collection(), &[a, b_prime.clone()]);
    assert_eq!(h.controller.selected(), &b_prime);
    assert_eq!(h.controller.state(), SelectionState::Viewing);
    assert_eq!(
        h.service.calls().await[1..],
        [BackendCall::Update("2".into())]
    );
}

#[tokio::test]
async fn test_create_is_two_phase() {
    let mut h = harness(Role::Manager).await;
    let draft = h.controller.start_create();
    draft.first_name = "Grace".into();
    draft.last_name = "Hopper".into();
    draft.role = Role::Contributor;

    assert_eq!(h.controller.accept().await.unwrap(), ActionOutcome::Completed);

    let calls = h.service.calls().await;
    let created = h.controller.selected().clone();
    assert_eq!(
        calls[1..],
        [
            BackendCall::Create(scope()),
            BackendCall::Update(created.identification().to_string()),
        ]
    );
    assert_eq!(created.role, Role::Contributor);
    assert_eq!(h.controller.collection().len(), 3);
    assert_eq!(
        h.navigation.replaced().last().cloned(),
        Some(format!("/users/{}", created.identification()))
    );
}

#[tokio::test]
async fn test_refused_delete_keeps_selection() {
    let mut h = harness(Role::Manager).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada);
    h.service.set_refuse_deletes(true);

    let outcome = h.controller.delete().await.unwrap();

    assert_eq!(outcome, ActionOutcome::Refused);
    assert!(h.controller.collection().contains(&ada));
    assert_eq!(h.notifier.count(), 1);
    assert!(h.controller.detail_visible());
    assert_eq!(h.controller.selected(), &ada);
}

#[tokio::test]
async fn test_contributor_cannot_delete() {
    let mut h = harness(Role::Contributor).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada);

    assert!(h.controller.disable_delete());
    assert_eq!(h.controller.delete().await.unwrap(), ActionOutcome::Rejected);
    assert_eq!(h.service.write_count().await, 0);
    assert_eq!(h.controller.state(), SelectionState::Idle);
}

#[tokio::test]
async fn test_deep_link_selects_on_initialize() {
    let h = harness_with(
        Role::Visitor,
        MemoryNavigation::with_identifier("2"),
        ControllerConfig::default(),
    )
    .await;

    assert_eq!(h.controller.selected().identification(), "2");
    assert_eq!(h.controller.state(), SelectionState::Viewing);
    assert_eq!(h.navigation.replaced(), vec!["/users/2".to_string()]);
}

#[tokio::test]
async fn test_deep_link_to_unknown_is_ignored() {
    let h = harness_with(
        Role::Visitor,
        MemoryNavigation::with_identifier("404"),
        ControllerConfig::default(),
    )
    .await;

    assert_eq!(h.controller.state(), SelectionState::Idle);
    assert!(h.navigation.replaced().is_empty());
}

#[tokio::test]
async fn test_signed_out_load_is_empty() {
    let mut h = harness(Role::Manager).await;
    h.ctx.sign_out();

    h.controller.initialize().await.unwrap();

    assert!(h.controller.collection().is_empty());
    assert_eq!(h.service.calls().await.len(), 1);
    assert!(h.controller.disable_accept());
}

#[tokio::test]
async fn test_create_without_focus_is_missing_scope() {
    let mut h = harness(Role::Manager).await;
    h.ctx.sign_in(Actor::global_admin("UAA00009"));
    h.ctx.clear_focus();

    let draft = h.controller.start_create();
    draft.first_name = "Grace".into();
    draft.last_name = "Hopper".into();
    draft.role = Role::Visitor;

    let err = h.controller.accept().await.unwrap_err();
    assert!(matches!(err, LifecycleError::MissingScope("user")));
    assert!(!err.is_user_facing());
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.service.write_count().await, 0);
    assert!(h.controller.is_new());
}

#[tokio::test]
async fn test_backend_failure_keeps_edit_open() {
    let mut h = harness(Role::Manager).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada).mail = Some("ada@example.org".into());
    h.service.set_fail_writes(true);

    let err = h.controller.accept().await.unwrap_err();

    assert!(err.is_user_facing());
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.controller.collection()[0], ada);
    assert_eq!(h.controller.state(), SelectionState::Editing);
    assert_eq!(
        h.controller.selected().mail.as_deref(),
        Some("ada@example.org")
    );
}

#[tokio::test(start_paused = true)]
async fn test_hung_backend_times_out() {
    let config = ControllerConfig {
        backend_timeout_secs: Some(5),
        ..ControllerConfig::default()
    };
    let mut h = harness_with(Role::Manager, MemoryNavigation::new(), config).await;
    let ada = h.controller.collection()[0].clone();
    h.controller.select(&ada);
    h.service.set_delay(Some(Duration::from_secs(60)));

    let err = h.controller.delete().await.unwrap_err();

    assert!(matches!(err, LifecycleError::Timeout(d) if d == Duration::from_secs(5)));
    assert_eq!(h.notifier.count(), 1);
    assert!(h.controller.detail_visible());
}

/// Backend that creates but fails every update.
struct UpdateFailsService;

#[async_trait]
impl ResourceService<User> for UpdateFailsService {
    async fn list_all(&self, _scope: &Scope) -> LifecycleResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn create(&self, fields: &NewPerson, _scope: &Scope) -> LifecycleResult<User> {
        Ok(User::from_new_fields(fields).with_identification("UAA00042")?)
    }

    async fn update(&self, _entity: &User) -> LifecycleResult<User> {
        Err(LifecycleError::Backend("update unavailable".into()))
    }

    async fn delete(&self, _identification: &str) -> LifecycleResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_failed_follow_up_update_continues_as_edit() {
    let ctx = SessionContext::with_actor(Actor::new("UAA00001", Role::Visitor));
    ctx.switch_common_group(COMMON_GROUP, Role::Manager);
    let notifier = MemoryNotifier::new();
    let mut controller: UserController = LifecycleController::new(
        ctx.clone(),
        Arc::new(UpdateFailsService),
        Arc::new(UserBehavior::new(PermissionEngine::new(ctx))),
        Arc::new(MemoryNavigation::new()),
        Arc::new(notifier.clone()),
        ControllerConfig::default(),
    );
    controller.initialize().await.unwrap();

    let draft = controller.start_create();
    draft.first_name = "Grace".into();
    draft.last_name = "Hopper".into();
    draft.role = Role::Visitor;
    draft.mail = Some("grace@example.org".into());

    assert!(controller.accept().await.is_err());
    assert_eq!(notifier.count(), 1);
    assert!(!controller.is_new());
    assert_eq!(controller.collection().len(), 1);
    assert_eq!(controller.collection()[0].identification(), "UAA00042");
    assert_eq!(controller.selected().identification(), "UAA00042");
    assert_eq!(controller.state(), SelectionState::Editing);
    assert!(!controller.disable_accept());
}

#[tokio::test]
async fn test_common_groups_load_globally() {
    let ctx = SessionContext::with_actor(Actor::global_admin("UAA00001"));
    let service = Arc::new(MemoryResourceService::<CommonGroup>::new());
    service
        .seed(
            Scope::Global,
            [CommonGroup::new("Research").with_identification(COMMON_GROUP).unwrap()],
        )
        .await;

    let mut controller: LifecycleController<CommonGroup> = LifecycleController::new(
        ctx.clone(),
        service.clone(),
        Arc::new(CommonGroupBehavior::new(PermissionEngine::new(ctx))),
        Arc::new(MemoryNavigation::new()),
        Arc::new(MemoryNotifier::new()),
        ControllerConfig::default(),
    );
    controller.initialize().await.unwrap();

    assert_eq!(controller.collection().len(), 1);
    assert_eq!(service.calls().await, vec![BackendCall::ListAll(Scope::Global)]);

    controller.apply_filter("  RESEARCH ");
    assert_eq!(controller.visible().len(), 1);
    controller.apply_filter("nothing");
    assert!(controller.visible().is_empty());
    assert_eq!(controller.collection().len(), 1);
}
