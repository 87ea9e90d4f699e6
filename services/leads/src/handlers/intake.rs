use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use vitrex_auth_types::cookie::read_referral_cookie;
use vitrex_auth_types::identity::Identity;
use vitrex_domain::id::SubmissionId;
use vitrex_domain::payload::{FormPayload, IntakePayload};
use vitrex_domain::referral::AttributionContext;

use crate::domain::types::DeliveryOutcome;
use crate::error::LeadsServiceError;
use crate::state::AppState;
use crate::usecase::intake::{SubmitFormInput, SubmitFormOutput, SubmitFormUseCase};

const DELIVERED_MESSAGE: &str =
    "Votre demande a bien été envoyée. Nous vous recontactons très rapidement.";
const FALLBACK_MESSAGE: &str = "L'envoi automatique n'a pas abouti. Cliquez sur le lien pour \
     envoyer votre demande depuis votre messagerie.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<SubmissionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_mailto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl From<SubmitFormOutput> for SubmitResponse {
    fn from(output: SubmitFormOutput) -> Self {
        let submission_id = output.submission_id;
        match output.outcome {
            DeliveryOutcome::Delivered => Self {
                success: true,
                message: DELIVERED_MESSAGE.to_owned(),
                submission_id,
                fallback_mailto: None,
                contact_phone: None,
            },
            DeliveryOutcome::Fallback { mailto } => Self {
                success: false,
                message: FALLBACK_MESSAGE.to_owned(),
                submission_id,
                fallback_mailto: Some(mailto),
                contact_phone: None,
            },
            DeliveryOutcome::Unavailable { contact_phone } => Self {
                success: false,
                message: format!(
                    "L'envoi de votre demande a échoué. Appelez-nous au {contact_phone}."
                ),
                submission_id,
                fallback_mailto: None,
                contact_phone: Some(contact_phone),
            },
        }
    }
}

/// Unwrap a JSON body, reporting shape errors (including unknown detail
/// fields) as `MALFORMED_PAYLOAD`.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, LeadsServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| LeadsServiceError::MalformedPayload(rejection.body_text()))
}

/// Shared by every public form endpoint.
pub(crate) async fn submit_form(
    state: &AppState,
    identity: Option<Identity>,
    jar: &CookieJar,
    payload: FormPayload,
) -> Result<Response, LeadsServiceError> {
    let usecase = SubmitFormUseCase {
        recorder: state.recorder(),
        dispatcher: state.dispatcher(),
    };
    let attribution = AttributionContext::capture(None, read_referral_cookie(jar).as_deref());
    let output = usecase
        .execute(SubmitFormInput {
            payload,
            user_id: identity.map(|i| i.user_id),
            attribution,
        })
        .await?;

    let status = match output.outcome {
        DeliveryOutcome::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DeliveryOutcome::Delivered | DeliveryOutcome::Fallback { .. } => StatusCode::OK,
    };
    Ok((status, Json(SubmitResponse::from(output))).into_response())
}

// ── POST /intake ─────────────────────────────────────────────────────────────

pub async fn submit_intake(
    identity: Option<Identity>,
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<IntakePayload>, JsonRejection>,
) -> Result<Response, LeadsServiceError> {
    let payload = json_body(body)?;
    submit_form(&state, identity, &jar, FormPayload::CarDamage(payload)).await
}
