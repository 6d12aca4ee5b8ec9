//! # Configuration Module
//!
//! - [`data_config`] - 실행 환경, 서버, Rate Limiting 설정
//! - [`auth_config`] - JWT, 쿠키, 외부 디렉터리, 세션 게이트 설정

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
