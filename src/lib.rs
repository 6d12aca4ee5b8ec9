//! VOS 인증 서비스
//!
//! ERP 프런트엔드를 위한 세션 인증 서비스입니다.
//! 외부 사용자 디렉터리(Directus)에 자격 증명을 확인하고,
//! 서명된 세션 쿠키를 발급하며, 보호된 페이지 접근을 세션 게이트로 제어합니다.
//!
//! # Features
//!
//! - **비밀번호 로그인**: 디렉터리 로그인 후 사용자당 단일 활성 세션 유지
//! - **RFID 로그인**: 태그 값만으로 로그인 (비밀번호 전송 없음)
//! - **세션 쿠키**: HS256 서명 액세스(15분)/리프레시(24시간) 토큰
//! - **세션 게이트**: 보호 경로에서 서버 측 `session_id` 비교

pub mod core;
pub mod config;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
