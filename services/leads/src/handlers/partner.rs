use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use axum_extra::extract::CookieJar;

use vitrex_auth_types::identity::Identity;
use vitrex_domain::payload::{FormPayload, PartnerApplication};

use crate::error::LeadsServiceError;
use crate::handlers::intake::{json_body, submit_form};
use crate::state::AppState;

// ── POST /partner ────────────────────────────────────────────────────────────

pub async fn submit_partner(
    identity: Option<Identity>,
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<PartnerApplication>, JsonRejection>,
) -> Result<Response, LeadsServiceError> {
    let application = json_body(body)?;
    submit_form(&state, identity, &jar, FormPayload::Partner(application)).await
}
