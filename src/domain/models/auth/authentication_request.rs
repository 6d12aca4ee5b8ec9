//! 인증 요청과 검증 결과
//!
//! 비밀번호/RFID 두 로그인 경로를 하나의 `Credential`로 표현하고,
//! 검증 결과는 공통 타입 `VerifiedIdentity`로 돌려줍니다.
//! `session_id` 발급 여부는 이후 단계에서 `auth_kind`로 한 번만 결정합니다.
use crate::domain::entities::users::user::DirectoryRecord;
use crate::domain::models::token::token::AuthKind;

/// 로그인 자격 증명
#[derive(Clone, PartialEq)]
pub enum Credential {
    Password { email: String, password: String },
    Rfid { rf: String },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .field("password", &"***")
                .finish(),
            Credential::Rfid { rf } => f.debug_struct("Rfid").field("rf", rf).finish(),
        }
    }
}

/// 검증을 통과한 사용자
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// 디렉터리 레코드
    pub record: DirectoryRecord,
    /// 인증 경로
    pub auth_kind: AuthKind,
    /// 후속 디렉터리 쓰기에 사용할 자격 증명 (서비스 계정 또는 사용자 본인)
    pub directory_token: Option<String>,
}
