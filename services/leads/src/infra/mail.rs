use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use serde::Serialize;

use crate::domain::repository::MailTransport;
use crate::domain::types::OutgoingMail;
use crate::error::LeadsServiceError;

#[derive(Serialize)]
struct Mailbox<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Request body accepted by the transactional mail API.
#[derive(Serialize)]
struct SendRequest<'a> {
    from: Mailbox<'a>,
    to: [Mailbox<'a>; 1],
    reply_to: Mailbox<'a>,
    subject: &'a str,
    text: &'a str,
}

impl<'a> From<&'a OutgoingMail> for SendRequest<'a> {
    fn from(mail: &'a OutgoingMail) -> Self {
        Self {
            from: Mailbox {
                email: &mail.from,
                name: Some(&mail.from_name),
            },
            to: [Mailbox {
                email: &mail.to,
                name: None,
            }],
            reply_to: Mailbox {
                email: &mail.reply_to,
                name: Some(&mail.from_name),
            },
            subject: &mail.subject,
            text: &mail.text,
        }
    }
}

/// Mail transport posting JSON to an HTTP mail API with a bearer key.
///
/// A request timeout counts as a transport failure like any other.
#[derive(Clone)]
pub struct HttpMailTransport {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpMailTransport {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build mail HTTP client")?;
        Ok(Self {
            client,
            api_url: api_url.to_owned(),
            api_key: api_key.to_owned(),
        })
    }
}

impl MailTransport for HttpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), LeadsServiceError> {
        self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(mail))
            .send()
            .await
            .context("send mail request")?
            .error_for_status()
            .context("mail API rejected message")?;
        Ok(())
    }
}
