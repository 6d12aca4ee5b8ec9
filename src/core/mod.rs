//! 서비스 조립 (`AppState`)

pub mod app_state;

pub use app_state::AppState;
