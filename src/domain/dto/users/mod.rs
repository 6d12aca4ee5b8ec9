//! 로그인/세션 엔드포인트 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
