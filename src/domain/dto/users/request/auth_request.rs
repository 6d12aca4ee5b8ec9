//! 로그인 요청 DTO
//!
//! 잘못된 형식의 요청은 네트워크 호출 전에 `validator`로 거절합니다.
use serde::Deserialize;
use validator::Validate;

use crate::domain::models::auth::authentication_request::Credential;

/// 이메일/비밀번호 로그인 요청 구조체
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn into_credential(self) -> Credential {
        Credential::Password {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// RFID 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RfidLoginRequest {
    #[validate(length(min = 1, max = 128, message = "RFID tag is required"))]
    pub rf: String,
}

impl RfidLoginRequest {
    pub fn into_credential(self) -> Credential {
        Credential::Rfid {
            rf: self.rf.trim().to_string(),
        }
    }
}
