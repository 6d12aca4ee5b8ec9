//! HTTP 요청 핸들러 모듈
//!
//! 실패는 `AppError`로 돌려 `{ok: false, message}` 형태의 JSON 응답이 되게 합니다.

pub mod auth;
pub mod session;
pub mod pages;
