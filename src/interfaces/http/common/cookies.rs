//! Session and flash cookies

use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};
use tracing::warn;

use super::flash::Flash;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Cookie attributes shared by every cookie the app sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// Only send cookies over HTTPS
    pub secure: bool,
}

impl CookieSettings {
    fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    pub fn session(&self, token: &str, max_age_hours: i64) -> Cookie<'static> {
        let mut cookie = self.build(SESSION_COOKIE, token.to_string());
        cookie.set_max_age(CookieDuration::hours(max_age_hours));
        cookie
    }

    pub fn flash(&self, flash: &Flash) -> Cookie<'static> {
        self.build(FLASH_COOKIE, flash.encode())
    }

    /// An already-expired cookie that makes the browser drop `name`.
    pub fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new());
        cookie.make_removal();
        cookie
    }
}

/// All cookies sent with a request, by name. Later duplicates win.
pub fn request_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_string()))
        .filter_map(Result::ok)
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect()
}

/// Append `Set-Cookie` headers to a response.
pub fn with_cookies(mut response: Response, cookies: &[Cookie<'static>]) -> Response {
    for cookie in cookies {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = cookie.name(), "Dropping unencodable cookie: {}", e),
        }
    }
    response
}

/// 303 redirect to `to` that also sets `cookies`.
pub fn redirect_with(to: &str, cookies: &[Cookie<'static>]) -> Response {
    with_cookies(Redirect::to(to).into_response(), cookies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn session_cookie_attributes() {
        let cookie = CookieSettings { secure: true }.session("tok", 12);
        let text = cookie.to_string();
        assert!(text.starts_with("session=tok"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("SameSite=Lax"));
        assert!(text.contains("Secure"));
        assert!(text.contains("Path=/"));
        assert!(text.contains("Max-Age=43200"));
    }

    #[test]
    fn removal_cookie_expires() {
        let text = CookieSettings::default().removal(FLASH_COOKIE).to_string();
        assert!(text.starts_with("flash="));
        assert!(text.contains("Max-Age=0"));
        assert!(!text.contains("Secure"));
    }

    #[test]
    fn parses_request_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc; theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("flash=xyz"));
        let cookies = request_cookies(&headers);
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc"));
        assert_eq!(cookies.get("flash").map(String::as_str), Some("xyz"));
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn redirect_carries_cookies() {
        let settings = CookieSettings::default();
        let response = redirect_with("/", &[settings.flash(&Flash::info("hi"))]);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let set = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set.starts_with("flash="));
    }
}
