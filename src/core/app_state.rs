//! 공유 애플리케이션 상태

use std::sync::Arc;

use crate::caching::machine_token::MachineTokenCache;
use crate::config::{CookieConfig, DirectusConfig, GateConfig, MachineCredentials};
use crate::repositories::users::{DirectusUserRepository, UserDirectory};
use crate::services::auth::{CredentialVerifier, SessionGate, SessionIssuer, TokenService};
use crate::utils::clock::{Clock, SystemClock};

/// 핸들러와 미들웨어가 공유하는 서비스 묶음
///
/// 서비스 계정 토큰 캐시는 모든 워커가 하나를 공유합니다.
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub verifier: CredentialVerifier,
    pub issuer: SessionIssuer,
    pub gate: SessionGate,
    pub cookies: CookieConfig,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: TokenService,
        machine: Option<MachineCredentials>,
        cookies: CookieConfig,
        gate: GateConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let machine_cache = Arc::new(MachineTokenCache::new(directory.clone(), machine, clock));
        if !machine_cache.is_configured() {
            log::warn!("서비스 계정 미설정: 세션 게이트의 서버 측 비교가 생략됩니다");
        }

        Self {
            verifier: CredentialVerifier::new(directory.clone(), machine_cache.clone()),
            issuer: SessionIssuer::new(tokens.clone(), directory.clone()),
            gate: SessionGate::new(tokens.clone(), directory, machine_cache, gate),
            tokens,
            cookies,
        }
    }

    /// 환경 변수로 운영용 상태를 조립합니다.
    pub fn from_env() -> Self {
        let directus = DirectusConfig::from_env();
        match &directus.base_url {
            Some(url) => log::info!("사용자 디렉터리: {} (컬렉션: {})", url, directus.user_collection),
            None => log::warn!("DIRECTUS_URL 미설정: 로그인 요청은 설정 오류로 응답합니다"),
        }

        let directory: Arc<dyn UserDirectory> = Arc::new(DirectusUserRepository::new(&directus));

        Self::new(
            directory,
            TokenService::from_env(),
            directus.machine,
            CookieConfig::from_env(),
            GateConfig::from_env(),
            Arc::new(SystemClock),
        )
    }
}
