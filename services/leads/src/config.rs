use anyhow::Context as _;

/// Leads service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LeadsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3114). Env var: `LEADS_PORT`.
    pub leads_port: u16,
    /// Transactional mail HTTP endpoint (e.g. "https://mail.example.com/v1/send").
    pub mail_api_url: String,
    /// Bearer key for the mail API.
    pub mail_api_key: String,
    /// Technical sending account. Never used as reply-to.
    pub mail_sender: String,
    /// Human inbox receiving leads; also the fallback mailto recipient.
    pub operator_email: String,
    /// Email of the single protected super-admin.
    pub main_admin_email: String,
    /// Last-resort phone number shown when no channel works.
    pub contact_phone: String,
    /// Referral cookie domain. Unset or empty means host-only.
    pub cookie_domain: Option<String>,
    /// Mail API request timeout in seconds (default 10). Env var: `MAIL_TIMEOUT_SECS`.
    pub mail_timeout_secs: u64,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl LeadsConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            leads_port: optional("LEADS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            mail_api_url: required("MAIL_API_URL")?,
            mail_api_key: required("MAIL_API_KEY")?,
            mail_sender: required("MAIL_SENDER")?,
            operator_email: required("OPERATOR_EMAIL")?,
            main_admin_email: required("MAIN_ADMIN_EMAIL")?,
            contact_phone: required("CONTACT_PHONE")?,
            cookie_domain: optional("COOKIE_DOMAIN"),
            mail_timeout_secs: optional("MAIL_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}
