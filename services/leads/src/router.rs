use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use vitrex_core::health::{healthz, readiness};
use vitrex_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    agent::{create_agent, delete_agent, get_agent, list_agents, update_agent},
    intake::submit_intake,
    partner::submit_partner,
    referral::capture_referral,
    submission::{delete_submission, get_submission, list_submissions},
    user::{delete_user, list_users, register_user, set_admin},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping().await.is_ok())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public forms
        .route("/referral", get(capture_referral))
        .route("/intake", post(submit_intake))
        .route("/partner", post(submit_partner))
        .route("/users", post(register_user))
        // Backoffice
        .route("/admin/submissions", get(list_submissions))
        .route(
            "/admin/submissions/{id}",
            get(get_submission).delete(delete_submission),
        )
        .route("/admin/agents", get(list_agents).post(create_agent))
        .route(
            "/admin/agents/{id}",
            get(get_agent).patch(update_agent).delete(delete_agent),
        )
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", patch(set_admin).delete(delete_user))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
