//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스들은 `AppState`에서 한 번 조립되어 `web::Data`로 모든 워커에 공유됩니다.
//! 디렉터리 접근은 `UserDirectory` trait을 통해서만 이루어집니다.

pub mod auth;
