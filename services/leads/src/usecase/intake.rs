use vitrex_domain::id::{SubmissionId, UserId};
use vitrex_domain::payload::FormPayload;
use vitrex_domain::referral::AttributionContext;

use crate::domain::repository::{AgentRepository, MailTransport, SubmissionRepository};
use crate::domain::types::DeliveryOutcome;
use crate::error::LeadsServiceError;
use crate::usecase::notification::DispatchNotificationUseCase;
use crate::usecase::submission::{RecordSubmissionInput, RecordSubmissionUseCase};

pub struct SubmitFormInput {
    pub payload: FormPayload,
    pub user_id: Option<UserId>,
    /// Attribution captured earlier in the visit (cookie).
    pub attribution: AttributionContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFormOutput {
    /// `None` when recording failed; the notification still went out.
    pub submission_id: Option<SubmissionId>,
    pub outcome: DeliveryOutcome,
}

/// validate → record (best-effort) → notify.
///
/// Recording and notification are independent side effects: a recording
/// failure is logged and never blocks the notification, and a notification
/// failure never undoes the record.
pub struct SubmitFormUseCase<A, S, M>
where
    A: AgentRepository,
    S: SubmissionRepository,
    M: MailTransport,
{
    pub recorder: RecordSubmissionUseCase<A, S>,
    pub dispatcher: DispatchNotificationUseCase<M>,
}

impl<A, S, M> SubmitFormUseCase<A, S, M>
where
    A: AgentRepository,
    S: SubmissionRepository,
    M: MailTransport,
{
    pub async fn execute(&self, input: SubmitFormInput) -> Result<SubmitFormOutput, LeadsServiceError> {
        let SubmitFormInput {
            mut payload,
            user_id,
            attribution,
        } = input;
        payload.validate()?;

        let attribution = attribution.or_payload(payload.referral_code());
        let referral_code = attribution.raw_code().map(str::to_owned);
        if let FormPayload::CarDamage(p) = &mut payload {
            p.referral_code.clone_from(&referral_code);
        }

        let submission_id = match self
            .recorder
            .execute(RecordSubmissionInput {
                payload: payload.clone(),
                user_id,
                referral_code: referral_code.clone(),
            })
            .await
        {
            Ok(recorded) => Some(recorded.id),
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    form_type = %payload.form_type(),
                    "failed to record submission, notifying anyway"
                );
                None
            }
        };

        let outcome = self
            .dispatcher
            .execute(&payload, referral_code.as_deref())
            .await;
        Ok(SubmitFormOutput {
            submission_id,
            outcome,
        })
    }
}
