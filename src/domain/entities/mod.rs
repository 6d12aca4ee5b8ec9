//! 도메인 엔티티
//!
//! 외부 사용자 디렉터리에서 읽어온 레코드를 표현합니다.

pub mod users;

pub use users::*;
