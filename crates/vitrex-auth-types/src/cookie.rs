//! Referral attribution cookie.
//!
//! A referral code captured from a `?ref=` link is remembered for a year so a
//! visitor who comes back later is still attributed to the referring agent.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the remembered referral code.
pub const REFERRAL_COOKIE: &str = "vitrex_ref";

/// Cookie Max-Age in seconds (365 days).
pub const REFERRAL_COOKIE_MAX_AGE: i64 = 365 * 24 * 60 * 60;

/// Remember a referral code on the jar.
///
/// `domain` is omitted from the cookie when `None` (host-only cookie).
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use vitrex_auth_types::cookie::{set_referral_cookie, REFERRAL_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_referral_cookie(jar, "AG-7K2QD".to_string(), Some("example.com".to_string()));
/// let cookie = jar.get(REFERRAL_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "AG-7K2QD");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::days(365)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_referral_cookie(jar: CookieJar, code: String, domain: Option<String>) -> CookieJar {
    let mut cookie = Cookie::build((REFERRAL_COOKIE, code))
        .path("/")
        .max_age(Duration::seconds(REFERRAL_COOKIE_MAX_AGE))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    if let Some(domain) = domain {
        cookie.set_domain(domain);
    }
    jar.add(cookie)
}

/// Read the remembered referral code, ignoring blank values.
///
/// ```
/// use axum_extra::extract::cookie::{Cookie, CookieJar};
/// use vitrex_auth_types::cookie::{read_referral_cookie, REFERRAL_COOKIE};
///
/// let jar = CookieJar::new();
/// assert_eq!(read_referral_cookie(&jar), None);
/// let jar = jar.add(Cookie::new(REFERRAL_COOKIE, "AG-7K2QD"));
/// assert_eq!(read_referral_cookie(&jar).as_deref(), Some("AG-7K2QD"));
/// let jar = jar.add(Cookie::new(REFERRAL_COOKIE, "  "));
/// assert_eq!(read_referral_cookie(&jar), None);
/// ```
pub fn read_referral_cookie(jar: &CookieJar) -> Option<String> {
    jar.get(REFERRAL_COOKIE)
        .map(|c| c.value().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
