//! 요청/응답 DTO 모듈
//!
//! HTTP 계층에서 주고받는 JSON 구조를 정의합니다.

pub mod users;

pub use users::*;
