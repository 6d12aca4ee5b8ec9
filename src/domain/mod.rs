//! 도메인 계층

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::DirectoryRecord;
pub use dto::users::{LoginRequest, LoginResponse, RfidLoginRequest, SessionUser};
pub use models::auth::{AuthenticatedUser, Credential, VerifiedIdentity};
pub use models::token::{AuthKind, SessionClaims};
