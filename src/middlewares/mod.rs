//! 미들웨어 모듈

pub mod session_gate;
mod gate_inner;

pub use session_gate::SessionGateMiddleware;
