//! 도메인 모델
//!
//! - [`token`] - 서명된 세션 토큰에 담기는 클레임
//! - [`auth`] - 로그인 자격 증명, 검증 결과, 인증된 사용자 추출자

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
