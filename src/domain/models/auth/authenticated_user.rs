use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use crate::domain::models::token::token::{AuthKind, SessionClaims};

/// 세션 게이트를 통과한 요청의 사용자 정보
///
/// 게이트가 검증한 클레임을 Request Extensions에 저장하면
/// 보호된 페이지 핸들러가 이 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_admin: bool,
    /// 인증 경로
    pub auth_kind: AuthKind,
}

impl From<&SessionClaims> for AuthenticatedUser {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            is_admin: claims.is_admin,
            auth_kind: claims.auth_kind,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<SessionClaims>() {
            Some(claims) => ready(Ok(AuthenticatedUser::from(claims))),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Not authenticated"
            ))),
        }
    }
}
