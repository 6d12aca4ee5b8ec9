//! Session Reader Handlers
//!
//! 쿠키에 담긴 세션을 읽어 현재 사용자 정보를 돌려주는 엔드포인트입니다.
//! 서버 측 상태는 읽지도 바꾸지도 않으며, 토큰 서명과 만료만 확인합니다.
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};

use crate::core::AppState;
use crate::domain::dto::users::response::{LoginResponse, OkResponse, SessionResponse, SessionUser};
use crate::errors::{AppError, AppResult};
use crate::utils::cookie_utils::{access_cookie, read_cookie, removal_cookie};

const NOT_AUTHENTICATED: &str = "Not authenticated";

/// 현재 사용자 조회
///
/// 액세스 쿠키를 먼저 보고, 검증에 실패하면 리프레시 쿠키를 봅니다.
///
/// # Endpoint
/// `GET /auth/me`
#[get("/me")]
pub async fn me(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let cookies = &state.cookies;

    let claims = [&cookies.access_name, &cookies.refresh_name]
        .into_iter()
        .filter_map(|name| read_cookie(req.headers(), name))
        .find_map(|token| state.tokens.verify(&token).ok())
        .map(|verified| verified.claims)
        .ok_or_else(|| AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(&claims)))
}

/// 클라이언트 세션 조회
///
/// 액세스 쿠키만 사용하며, 클라이언트 측 API 호출용으로 토큰을 함께 돌려줍니다.
///
/// # Endpoint
/// `GET /auth/session`
#[get("/session")]
pub async fn session(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let token = read_cookie(req.headers(), &state.cookies.access_name)
        .ok_or_else(|| AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()))?;

    let verified = state.tokens.verify(&token).map_err(|rejection| {
        log::debug!("세션 조회 거부: {}", rejection);
        AppError::AuthenticationError(NOT_AUTHENTICATED.to_string())
    })?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        user: SessionUser::from(&verified.claims),
        access_token: token,
    }))
}

/// 액세스 토큰 갱신
///
/// 리프레시 쿠키의 클레임 그대로 새 액세스 쿠키만 발급합니다.
/// 리프레시 쿠키가 무효하면 지우고 `401`을 돌려줍니다.
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let cookies = &state.cookies;
    let Some(token) = read_cookie(req.headers(), &cookies.refresh_name) else {
        return Err(AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()));
    };

    let verified = match state.tokens.verify(&token) {
        Ok(verified) => verified,
        Err(rejection) => {
            log::info!("리프레시 토큰 거부: {}", rejection);
            let mut response =
                AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()).error_response();
            if let Err(e) = response.add_cookie(&removal_cookie(&cookies.refresh_name, cookies.secure)) {
                log::warn!("리프레시 쿠키 삭제 헤더 생성 실패: {}", e);
            }
            return Ok(response);
        }
    };

    let access_token = state
        .tokens
        .sign(&verified.claims, crate::config::JwtConfig::ACCESS_TTL_SECONDS)?;
    log::debug!("액세스 토큰 갱신: user_id={}", verified.claims.sub);

    Ok(HttpResponse::Ok()
        .cookie(access_cookie(cookies, &access_token))
        .json(OkResponse::ok()))
}
