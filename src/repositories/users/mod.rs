//! 사용자 디렉터리 리포지토리

pub mod user_repo;
#[cfg(test)]
pub mod in_memory;

pub use user_repo::{AccessGrant, DirectoryError, DirectusUserRepository, UserDirectory};
