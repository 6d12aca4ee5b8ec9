//! # 서비스 계정 자격 증명 캐시
//!
//! 세션 게이트는 매 요청마다 디렉터리에서 `session_id`를 조회해야 하므로
//! 서비스 계정으로 로그인한 액세스 토큰을 `{value, expires_at}` 형태로 보관합니다.
//!
//! - 만료 [`REFRESH_SKEW_SECONDS`]초 전부터는 미리 다시 로그인합니다.
//! - 동시에 두 요청이 갱신하면 둘 다 성공하고 나중에 쓴 값이 남습니다.
//!   잠금은 값 교체 순간에만 잡고 네트워크 호출 중에는 잡지 않습니다.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::config::MachineCredentials;
use crate::repositories::users::UserDirectory;
use crate::utils::clock::Clock;

/// 만료 몇 초 전부터 갱신할지
pub const REFRESH_SKEW_SECONDS: i64 = 5;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct MachineTokenCache {
    directory: Arc<dyn UserDirectory>,
    credentials: Option<MachineCredentials>,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<CachedToken>>,
}

impl MachineTokenCache {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        credentials: Option<MachineCredentials>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            credentials,
            clock,
            slot: RwLock::new(None),
        }
    }

    /// 서비스 계정이 설정되어 있는지
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// 캐시된 토큰을 반환하고, 만료가 가까우면 다시 로그인합니다.
    ///
    /// 서비스 계정이 없거나 로그인에 실패하면 `None`을 반환합니다.
    pub async fn get_or_refresh(&self) -> Option<String> {
        let credentials = self.credentials.as_ref()?;

        if let Some(value) = self.fresh_value() {
            return Some(value);
        }

        match self
            .directory
            .authenticate(&credentials.email, &credentials.password)
            .await
        {
            Ok(grant) => {
                let expires_at = self.clock.now() + Duration::milliseconds(grant.expires_in_ms);
                self.store(CachedToken {
                    value: grant.access_token.clone(),
                    expires_at,
                });
                log::debug!("서비스 계정 토큰 갱신됨 (만료: {})", expires_at);
                Some(grant.access_token)
            }
            Err(e) => {
                log::warn!("서비스 계정 로그인 실패: {}", e);
                None
            }
        }
    }

    /// 캐시를 비웁니다.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    fn fresh_value(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let cached = slot.as_ref()?;
        let refresh_at = cached.expires_at - Duration::seconds(REFRESH_SKEW_SECONDS);
        (self.clock.now() < refresh_at).then(|| cached.value.clone())
    }

    fn store(&self, token: CachedToken) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(token);
    }
}
