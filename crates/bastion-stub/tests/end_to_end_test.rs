//! End-to-end tests: the real HTTP client and workflow service against a
//! stub server listening on an ephemeral port.

use std::sync::Arc;

use bastion_client::{GovernanceApi, GovernanceApiConfig, GovernanceClient};
use bastion_core::{ResourceId, Role};
use bastion_service::{GovernanceError, GovernanceService, Session};
use bastion_state::ResourceStatus;
use bastion_store::ResourceStore;
use bastion_stub::{router, AppState};

/// Start a stub server and return a client pointed at it.
async fn spawn_stub() -> (GovernanceClient, AppState) {
    let state = AppState::demo().unwrap();
    let app = router(state.clone(), "/api");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = GovernanceApiConfig::new(&format!("http://{addr}/api")).unwrap();
    (GovernanceClient::new(config).unwrap(), state)
}

async fn logged_in(client: &GovernanceClient, email: &str) -> GovernanceService {
    let session = Session::login(client, email, "pw").await.unwrap();
    let token = session.token().unwrap().to_string();
    let api: Arc<dyn GovernanceApi> = Arc::new(client.with_token(&token).unwrap());
    let svc = GovernanceService::new(api, ResourceStore::new(), session);
    assert!(!svc.refresh().await.is_stale());
    svc
}

fn id(s: &str) -> ResourceId {
    ResourceId::new(s).unwrap()
}

#[tokio::test]
async fn two_stage_deletion_over_http() {
    let (client, state) = spawn_stub().await;

    let owner = logged_in(&client, "jean.martin@exemple.fr").await;
    assert_eq!(owner.role(), Role::User);
    assert_eq!(owner.resources().len(), 5);

    owner.approve_for_deletion(&id("3")).await.unwrap();
    assert_eq!(
        state.store().get(&id("3")).unwrap().status(),
        ResourceStatus::ApprovedForDeletion
    );

    let admin = logged_in(&client, "admin@exemple.fr").await;
    let confirmed = admin.confirm_deletion(&id("3")).await.unwrap();
    assert_eq!(confirmed.status(), ResourceStatus::DeletionApproved);
    assert_eq!(
        state.store().get(&id("3")).unwrap().status(),
        ResourceStatus::DeletionApproved
    );
}

#[tokio::test]
async fn keep_with_ritm_over_http() {
    let (client, state) = spawn_stub().await;
    let owner = logged_in(&client, "marie.dubois@exemple.fr").await;

    let kept = owner.reject_for_deletion(&id("1"), "RITM123456").await.unwrap();
    assert_eq!(kept.ritm_number().unwrap().as_str(), "RITM123456");
    assert_eq!(
        state.store().get(&id("1")).unwrap().ritm_number().unwrap().as_str(),
        "RITM123456"
    );
}

#[tokio::test]
async fn server_side_refusal_leaves_local_store_unchanged() {
    let (client, state) = spawn_stub().await;
    let owner = logged_in(&client, "jean.martin@exemple.fr").await;

    // Someone else decided on resource 1 after our refresh.
    state
        .store()
        .apply_transition(
            &id("1"),
            bastion_state::LifecycleAction::ApproveForDeletion,
            Role::User,
            &bastion_state::TransitionInput::none(),
        )
        .unwrap();

    let err = owner.approve_for_deletion(&id("1")).await.unwrap_err();
    assert!(matches!(err, GovernanceError::Upstream { status: Some(403), .. }));
    assert_eq!(owner.get(&id("1")).unwrap().status(), ResourceStatus::Pending);
}

#[tokio::test]
async fn unauthenticated_client_runs_in_mock_mode() {
    let (client, _state) = spawn_stub().await;
    let resources = client.list_resources().await.unwrap();
    assert_eq!(resources.len(), 5);

    let r = client.confirm_deletion(&id("2")).await.unwrap();
    assert_eq!(r.status(), ResourceStatus::DeletionApproved);
}
