//! 데이터 접근 계층
//!
//! 사용자 데이터의 원본은 외부 디렉터리이며 자체 저장소는 없습니다.

pub mod users;
