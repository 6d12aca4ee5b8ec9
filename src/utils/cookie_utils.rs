//! # 세션 쿠키 유틸리티
//!
//! 원시 `Cookie` 헤더에서 값을 꺼내고, 세션 쿠키를 만들거나 지우는 함수들입니다.
//! 세션 쿠키는 항상 `HttpOnly`, `SameSite=Lax`, `Path=/`이며
//! `Secure`는 [`CookieConfig::secure`]를 따릅니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{COOKIE, HeaderMap};

use crate::config::{CookieConfig, JwtConfig};

/// 요청 헤더에서 이름이 일치하는 첫 번째 쿠키 값을 찾습니다.
///
/// 값은 퍼센트 디코딩되며, 빈 값은 없는 것으로 취급합니다.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .filter_map(|header| header.to_str().ok())
        .find_map(|cookie_str| find_in_header(cookie_str, name))
}

/// `a=1; b=2` 형태의 헤더 문자열에서 쿠키 값을 찾습니다.
pub fn find_in_header(cookie_str: &str, name: &str) -> Option<String> {
    for cookie_pair in cookie_str.split(';') {
        let Some((key, value)) = cookie_pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() != name {
            continue;
        }

        let value = value.trim().trim_matches('"');
        if value.is_empty() {
            return None;
        }
        return Some(
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        );
    }
    None
}

fn session_cookie(name: &str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build(name.to_string(), value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .finish()
}

/// 액세스 토큰 쿠키 (15분)
pub fn access_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    session_cookie(
        &config.access_name,
        token.to_string(),
        Duration::seconds(JwtConfig::ACCESS_TTL_SECONDS),
        config.secure,
    )
}

/// 리프레시 토큰 쿠키 (24시간)
pub fn refresh_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    session_cookie(
        &config.refresh_name,
        token.to_string(),
        Duration::seconds(JwtConfig::REFRESH_TTL_SECONDS),
        config.secure,
    )
}

/// 쿠키를 지우는 `Max-Age=0` 쿠키
pub fn removal_cookie(name: &str, secure: bool) -> Cookie<'static> {
    session_cookie(name, String::new(), Duration::ZERO, secure)
}
