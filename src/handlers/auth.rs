//! Authentication HTTP Handlers
//!
//! 로그인과 로그아웃 엔드포인트입니다. 성공한 로그인은 세션 쿠키 두 개를 내려주고
//! 응답 본문에는 화면 표시용 사용자 정보만 담습니다.
//!
//! # Login Paths
//!
//! - **비밀번호 로그인**: `POST /auth/login` (새 `session_id` 발급, 이전 세션 무효화)
//! - **RFID 로그인**: `POST /auth/login-rfid` (`session_id` 없음)
//! - **로그아웃**: `POST /auth/logout`
use actix_web::{HttpResponse, post, web};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::users::request::{LoginRequest, RfidLoginRequest};
use crate::domain::dto::users::response::{LoginResponse, OkResponse};
use crate::domain::models::auth::authentication_request::{Credential, VerifiedIdentity};
use crate::errors::{AppError, AppResult};
use crate::utils::cookie_utils::{access_cookie, refresh_cookie, removal_cookie};

/// 비밀번호 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
///
/// # Responses
/// - `200` `{ok: true, user}` + 세션 쿠키
/// - `400` 형식 오류, `401` 비밀번호 불일치, `403` 비활성 계정, `404` 미등록 사용자
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let identity = state.verifier.verify(payload.into_inner().into_credential()).await?;
    start_session(&state, identity).await
}

/// RFID 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login-rfid`
#[post("/login-rfid")]
pub async fn login_rfid(
    state: web::Data<AppState>,
    payload: web::Json<RfidLoginRequest>,
) -> AppResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let credential = payload.into_inner().into_credential();
    if matches!(&credential, Credential::Rfid { rf } if rf.is_empty()) {
        return Err(AppError::ValidationError("RFID tag is required".to_string()));
    }

    let identity = state.verifier.verify(credential).await?;
    start_session(&state, identity).await
}

/// 로그아웃 핸들러
///
/// 두 세션 쿠키를 모두 지웁니다. 서버 측 기록은 건드리지 않습니다.
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let cookies = &state.cookies;
    HttpResponse::Ok()
        .cookie(removal_cookie(&cookies.access_name, cookies.secure))
        .cookie(removal_cookie(&cookies.refresh_name, cookies.secure))
        .json(OkResponse::ok())
}

/// 토큰 쌍을 발급하고 쿠키를 붙인 응답을 만듭니다.
///
/// `session_id` 기록은 실패해도 로그인을 막지 않습니다.
async fn start_session(
    state: &AppState,
    identity: VerifiedIdentity,
) -> AppResult<HttpResponse> {
    let session = state.issuer.issue(&identity)?;
    let session = state.issuer.remember(session).await?;

    let mut response = HttpResponse::Ok();
    response
        .cookie(access_cookie(&state.cookies, &session.access_token))
        .cookie(refresh_cookie(&state.cookies, &session.refresh_token));

    log::info!(
        "세션 발급: user_id={} auth_kind={}",
        session.claims.sub,
        session.claims.auth_kind.as_str()
    );
    Ok(response.json(LoginResponse::new(&session.claims)))
}
