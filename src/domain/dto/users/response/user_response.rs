//! 로그인/세션 응답 DTO
use serde::Serialize;

use crate::domain::models::token::token::{AuthKind, SessionClaims};

/// 화면 표시용 세션 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_admin: bool,
    pub auth_kind: AuthKind,
}

impl From<&SessionClaims> for SessionUser {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            is_admin: claims.is_admin,
            auth_kind: claims.auth_kind,
        }
    }
}

/// `POST /auth/login`, `POST /auth/login-rfid`, `GET /auth/me` 응답
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: SessionUser,
}

impl LoginResponse {
    pub fn new(claims: &SessionClaims) -> Self {
        Self {
            ok: true,
            user: SessionUser::from(claims),
        }
    }
}

/// `GET /auth/session` 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub access_token: String,
}

/// `{ "ok": true }`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
