//! 인증 및 세션 서비스 모듈
//!
//! 로그인 자격 증명 검증부터 세션 발급, 보호 페이지 게이트까지 담당합니다.

pub mod token_service;
pub mod credential_service;
pub mod session_service;
pub mod gate_service;

pub use token_service::*;
pub use credential_service::*;
pub use session_service::*;
pub use gate_service::*;
