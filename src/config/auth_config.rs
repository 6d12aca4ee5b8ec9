//! # Authentication Configuration Module
//!
//! JWT 서명 키, 세션 쿠키, 외부 사용자 디렉터리(Directus), 세션 게이트 관련
//! 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 외부 디렉터리
//! export DIRECTUS_URL="https://cms.example.com"
//! export DIRECTUS_MACHINE_EMAIL="svc@example.com"      # 선택
//! export DIRECTUS_MACHINE_PASSWORD="..."                # 선택
//! export DIRECTUS_USER_COLLECTION="user"                # 선택
//!
//! # 토큰 / 쿠키
//! export AUTH_JWT_SECRET="$(openssl rand -base64 32)"
//! export APP_ACCESS_COOKIE="vos_app_access"
//! export APP_REFRESH_COOKIE="vos_app_refresh"
//!
//! # 세션 게이트
//! export APP_LOGIN_PATH="/login"
//! export APP_GATE_ALLOW_RFID="false"   # RFID 세션의 보호 경로 접근 허용
//! ```

use std::env;

use crate::config::Environment;

/// 서명 키가 설정되지 않았을 때 사용하는 개발용 키
const DEV_FALLBACK_SECRET: &str = "vos-dev-insecure-secret-change-me";

/// JSON Web Token (JWT) 관련 설정
///
/// 액세스 토큰은 짧게(15분), 리프레시 토큰은 하루 동안 유효합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// 액세스 토큰 유효 시간 (초)
    pub const ACCESS_TTL_SECONDS: i64 = 15 * 60;

    /// 리프레시 토큰 유효 시간 (초)
    pub const REFRESH_TTL_SECONDS: i64 = 24 * 60 * 60;

    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `AUTH_JWT_SECRET`이 없으면 고정된 개발용 키를 사용하며 경고 로그를 남깁니다.
    /// 이 키로 서명된 토큰은 누구나 위조할 수 있으므로 프로덕션에서는 반드시 설정하세요.
    pub fn secret() -> String {
        match env::var("AUTH_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                log::warn!(
                    "⚠️ AUTH_JWT_SECRET not set, using built-in development secret (NOT secure for production!)"
                );
                DEV_FALLBACK_SECRET.to_string()
            }
        }
    }
}

/// 세션 쿠키 설정
///
/// 쿠키 이름은 환경 변수로 재정의할 수 있으며,
/// `Secure` 플래그는 프로덕션 환경에서만 켜집니다.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieConfig {
    /// 액세스 토큰 쿠키 이름
    pub access_name: String,
    /// 리프레시 토큰 쿠키 이름
    pub refresh_name: String,
    /// `Secure` 플래그 여부
    pub secure: bool,
}

impl CookieConfig {
    pub const DEFAULT_ACCESS_NAME: &'static str = "vos_app_access";
    pub const DEFAULT_REFRESH_NAME: &'static str = "vos_app_refresh";

    /// 환경 변수에서 쿠키 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self {
            access_name: env::var("APP_ACCESS_COOKIE")
                .unwrap_or_else(|_| Self::DEFAULT_ACCESS_NAME.to_string()),
            refresh_name: env::var("APP_REFRESH_COOKIE")
                .unwrap_or_else(|_| Self::DEFAULT_REFRESH_NAME.to_string()),
            secure: Environment::current().is_production(),
        }
    }

    /// 기본 쿠키 이름으로 설정을 생성합니다.
    pub fn for_environment(environment: &Environment) -> Self {
        Self {
            access_name: Self::DEFAULT_ACCESS_NAME.to_string(),
            refresh_name: Self::DEFAULT_REFRESH_NAME.to_string(),
            secure: environment.is_production(),
        }
    }
}

/// 외부 사용자 디렉터리(Directus) 설정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectusConfig {
    /// 백엔드 기본 주소 (끝의 `/`는 제거됨)
    pub base_url: Option<String>,
    /// 서비스 계정 자격 증명 (이메일, 비밀번호)
    pub machine: Option<MachineCredentials>,
    /// 사용자 레코드가 저장된 컬렉션 이름
    pub user_collection: String,
}

/// 서비스 계정 자격 증명
#[derive(Clone, PartialEq)]
pub struct MachineCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for MachineCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl DirectusConfig {
    pub const DEFAULT_USER_COLLECTION: &'static str = "user";

    /// 환경 변수에서 디렉터리 설정을 읽습니다.
    ///
    /// `DIRECTUS_URL`이 비어 있으면 `base_url`은 `None`이 되고,
    /// 로그인 요청은 설정 오류(500)로 응답합니다.
    pub fn from_env() -> Self {
        let base_url = env::var("DIRECTUS_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let machine = match (
            env::var("DIRECTUS_MACHINE_EMAIL"),
            env::var("DIRECTUS_MACHINE_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(MachineCredentials {
                    email: email.trim().to_string(),
                    password,
                })
            }
            _ => None,
        };

        if base_url.is_none() {
            log::error!("DIRECTUS_URL not set; login endpoints will report a configuration error");
        }
        if machine.is_none() {
            log::warn!("Directus machine credentials not set; falling back to per-user credentials");
        }

        Self {
            base_url,
            machine,
            user_collection: env::var("DIRECTUS_USER_COLLECTION")
                .unwrap_or_else(|_| Self::DEFAULT_USER_COLLECTION.to_string()),
        }
    }
}

/// 세션 게이트 설정
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    /// 게이트가 적용되는 경로 접두사
    pub protected_prefixes: Vec<String>,
    /// 로그인 페이지 경로
    pub login_path: String,
    /// `session_id`가 없는 RFID 세션을 통과시킬지 여부 (기본값: 거부)
    pub allow_rfid_sessions: bool,
}

impl GateConfig {
    pub const DEFAULT_PROTECTED_PREFIXES: [&'static str; 5] =
        ["/dashboard", "/admin", "/operation", "/hr", "/reports"];

    pub fn from_env() -> Self {
        Self {
            login_path: env::var("APP_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            allow_rfid_sessions: env::var("APP_GATE_ALLOW_RFID")
                .map(|value| Self::parse_flag(&value))
                .unwrap_or(false),
            ..Self::default()
        }
    }

    fn parse_flag(value: &str) -> bool {
        matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: Self::DEFAULT_PROTECTED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            login_path: "/login".to_string(),
            allow_rfid_sessions: false,
        }
    }
}
