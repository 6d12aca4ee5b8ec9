//! 캐싱 계층 모듈

pub mod machine_token;
