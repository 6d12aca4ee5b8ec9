//! 세션 토큰 클레임
//!
//! 서명된 토큰 안에 담기는 세션 정보와, 발급/만료 시각을 더한 JWT 페이로드를 정의합니다.
use serde::{Deserialize, Serialize};

/// 세션을 만든 인증 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    /// 이메일 + 비밀번호 로그인
    Password,
    /// RFID 태그 로그인
    Rfid,
}

impl AuthKind {
    /// 서버 측 세션 레코드(단일 활성 세션)에 참여하는지 여부
    ///
    /// 비밀번호 로그인만 `session_id`를 발급하고 기록합니다.
    pub fn tracks_session(&self) -> bool {
        matches!(self, AuthKind::Password)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthKind::Password => "password",
            AuthKind::Rfid => "rfid",
        }
    }
}

/// 세션 클레임
///
/// - `sub`: 사용자 ID (항상 비어 있지 않음)
/// - `session_id`: 비밀번호 로그인 세션에만 존재
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 표시 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub auth_kind: AuthKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// `session_id`를 디렉터리에 기록하지 못한 세션
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unrecorded: bool,
}

impl SessionClaims {
    pub fn has_subject(&self) -> bool {
        !self.sub.trim().is_empty()
    }
}

/// JWT 페이로드: 세션 클레임 + 발급/만료 시각 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub session: SessionClaims,
    pub iat: i64,
    pub exp: i64,
}
