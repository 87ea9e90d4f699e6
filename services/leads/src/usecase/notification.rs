use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use vitrex_domain::glass::Labelled;
use vitrex_domain::payload::FormPayload;
use vitrex_domain::validation::is_valid_email;

use crate::domain::repository::MailTransport;
use crate::domain::types::{DeliveryOutcome, MAX_MAILTO_LEN, OutgoingMail};

/// Longest value kept verbatim in a summary line, in characters.
const SUMMARY_VALUE_MAX: usize = 160;

/// RFC 3986 unreserved characters stay literal, everything else is escaped
/// (spaces become `%20`, never `+`).
const MAILTO_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailtoError {
    #[error("invalid mailto recipient: {0:?}")]
    InvalidRecipient(String),
    #[error("mailto link is {len} characters, over the {max} limit")]
    TooLong { len: usize, max: usize },
}

/// Subject and bodies rendered from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub subject: String,
    pub body: String,
    /// Shorter body used when the full one does not fit in a mailto link.
    pub summary: String,
}

fn line(out: &mut String, caption: &str, value: &str) {
    out.push_str(&format!("{caption} : {value}\n"));
}

fn clip(value: &str) -> String {
    let value = value.trim();
    match value.char_indices().nth(SUMMARY_VALUE_MAX) {
        Some((end, _)) => format!("{}…", value[..end].trim_end()),
        None => value.to_owned(),
    }
}

/// Render the operator notification for a submission.
pub fn compose(payload: &FormPayload, referral_code: Option<&str>) -> NotificationContent {
    let mut body = String::new();
    let mut summary = String::new();
    let subject = match payload {
        FormPayload::CarDamage(p) => {
            let c = &p.contact;
            let glass = p.glass_type().label();

            body.push_str("Nouvelle demande de prise en charge\n\n");
            line(&mut body, "Prénom", c.first_name.trim());
            line(&mut body, "Nom", c.last_name.trim());
            line(&mut body, "E-mail", c.email.trim());
            line(&mut body, "Téléphone", c.phone.trim());
            line(&mut body, "Immatriculation", &c.license_plate);
            line(&mut body, "Assurance", c.insurer_label());
            line(
                &mut body,
                "Adresse",
                &format!("{}, {} {}", c.address.trim(), c.postal_code.trim(), c.city.trim()),
            );
            body.push('\n');
            line(&mut body, "Vitrage", glass);
            for (caption, value) in p.damage.summary_lines() {
                line(&mut body, caption, &value);
            }

            line(&mut summary, "Client", &c.full_name());
            line(&mut summary, "Téléphone", c.phone.trim());
            line(&mut summary, "E-mail", c.email.trim());
            line(&mut summary, "Immatriculation", &c.license_plate);
            line(&mut summary, "Assurance", &clip(c.insurer_label()));
            line(&mut summary, "Vitrage", glass);
            for (caption, value) in p.damage.summary_lines() {
                line(&mut summary, caption, &clip(&value));
            }

            format!("Nouvelle demande - {glass} - {}", c.full_name())
        }
        FormPayload::Partner(p) => {
            body.push_str("Nouvelle candidature partenaire\n\n");
            line(&mut body, "Prénom", p.first_name.trim());
            line(&mut body, "Nom", p.last_name.trim());
            line(&mut body, "E-mail", p.email.trim());
            line(&mut body, "Téléphone", p.phone.trim());
            if let Some(company) = p.company.as_deref().filter(|c| !c.trim().is_empty()) {
                line(&mut body, "Société", company.trim());
            }
            body.push('\n');
            body.push_str(p.message.trim());
            body.push('\n');

            line(&mut summary, "Candidat", &p.full_name());
            line(&mut summary, "Téléphone", p.phone.trim());
            line(&mut summary, "E-mail", p.email.trim());

            format!("Nouvelle candidature partenaire - {}", p.full_name())
        }
    };
    if let Some(code) = referral_code {
        body.push('\n');
        line(&mut body, "Code parrain", code);
        line(&mut summary, "Code parrain", code);
    }
    NotificationContent {
        subject,
        body,
        summary,
    }
}

/// Build `mailto:<recipient>?subject=..&body=..`.
pub fn build_mailto(recipient: &str, subject: &str, body: &str) -> Result<String, MailtoError> {
    let recipient = recipient.trim();
    if !is_valid_email(recipient) {
        return Err(MailtoError::InvalidRecipient(recipient.to_owned()));
    }
    let link = format!(
        "mailto:{recipient}?subject={}&body={}",
        utf8_percent_encode(subject, MAILTO_COMPONENT),
        utf8_percent_encode(body, MAILTO_COMPONENT),
    );
    if link.len() > MAX_MAILTO_LEN {
        return Err(MailtoError::TooLong {
            len: link.len(),
            max: MAX_MAILTO_LEN,
        });
    }
    Ok(link)
}

/// Fallback link, falling back again to the summary body when the full one
/// is too long.
pub fn fallback_mailto(
    recipient: &str,
    content: &NotificationContent,
) -> Result<String, MailtoError> {
    match build_mailto(recipient, &content.subject, &content.body) {
        Err(MailtoError::TooLong { len, .. }) => {
            tracing::debug!(len, "mailto body too long, using summary");
            build_mailto(recipient, &content.subject, &content.summary)
        }
        other => other,
    }
}

// ── DispatchNotification ─────────────────────────────────────────────────────

pub struct DispatchNotificationUseCase<M: MailTransport> {
    pub transport: M,
    /// Technical sending account.
    pub sender: String,
    /// Human inbox receiving leads.
    pub operator_email: String,
    pub contact_phone: String,
}

impl<M: MailTransport> DispatchNotificationUseCase<M> {
    /// Deliver the notification, degrading to a mailto link and then to the
    /// contact phone. Never fails.
    pub async fn execute(
        &self,
        payload: &FormPayload,
        referral_code: Option<&str>,
    ) -> DeliveryOutcome {
        let content = compose(payload, referral_code);
        let mail = OutgoingMail {
            from: self.sender.clone(),
            from_name: payload.submitter_name(),
            reply_to: payload.submitter_email().to_owned(),
            to: self.operator_email.clone(),
            subject: content.subject.clone(),
            text: content.body.clone(),
        };

        let error = match self.transport.send(&mail).await {
            Ok(()) => {
                tracing::info!(form_type = %payload.form_type(), "notification delivered");
                return DeliveryOutcome::Delivered;
            }
            Err(e) => e,
        };

        match fallback_mailto(&self.operator_email, &content) {
            Ok(mailto) => {
                tracing::warn!(
                    error = ?error,
                    form_type = %payload.form_type(),
                    "notification transport failed, returning mailto fallback"
                );
                DeliveryOutcome::Fallback { mailto }
            }
            Err(mailto_error) => {
                tracing::error!(
                    error = ?error,
                    mailto_error = %mailto_error,
                    form_type = %payload.form_type(),
                    "notification transport failed and no fallback could be built"
                );
                DeliveryOutcome::Unavailable {
                    contact_phone: self.contact_phone.clone(),
                }
            }
        }
    }
}
