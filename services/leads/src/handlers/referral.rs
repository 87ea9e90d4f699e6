use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use vitrex_auth_types::cookie::{read_referral_cookie, set_referral_cookie};
use vitrex_domain::referral::AttributionContext;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReferralQuery {
    #[serde(rename = "ref")]
    pub code: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub referral_code: Option<String>,
}

// ── GET /referral ────────────────────────────────────────────────────────────

/// Capture `?ref=` into the attribution cookie, or echo the stored code.
///
/// The code stays opaque here; it is only resolved against agents when a
/// submission is recorded.
pub async fn capture_referral(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ReferralQuery>,
) -> impl IntoResponse {
    let stored = read_referral_cookie(&jar);
    let attribution = AttributionContext::capture(query.code.as_deref(), stored.as_deref());
    let referral_code = attribution.raw_code().map(str::to_owned);

    let jar = match (&referral_code, attribution.should_persist()) {
        (Some(code), true) => {
            tracing::info!(referral_code = %code, "referral code captured");
            set_referral_cookie(jar, code.clone(), state.cookie_domain.clone())
        }
        _ => jar,
    };
    (jar, Json(ReferralResponse { referral_code }))
}
