//! 디렉터리 사용자 엔티티

pub mod user;

pub use user::{DeletedFlag, DirectoryRecord, DIRECTORY_FIELDS, is_deleted_flag};
