//! # 세션 게이트
//!
//! 보호된 페이지 요청마다 액세스 쿠키를 검사하고 통과/리다이렉트를 결정합니다.
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 쿠키 없음 | 로그인 페이지로 리다이렉트 |
//! | 서명/만료 검증 실패 | 쿠키 삭제 + 리다이렉트 |
//! | `session_id` 없음 | 쿠키 삭제 + 리다이렉트 |
//! | 기록 실패로 표시된 세션, 디렉터리 조회 불가 | 통과 (경고 로그) |
//! | 기록된 `session_id`와 불일치 | 쿠키 삭제 + 리다이렉트 |
//! | 일치 | 통과 |
//!
//! RFID 세션은 `session_id`가 없으므로 기본적으로 거부되며,
//! [`GateConfig::allow_rfid_sessions`]가 켜져 있으면 서명과 주체만 확인하고 통과시킵니다.

use std::sync::Arc;

use crate::caching::machine_token::MachineTokenCache;
use crate::config::GateConfig;
use crate::domain::models::token::token::SessionClaims;
use crate::repositories::users::{DirectoryError, UserDirectory};
use crate::services::auth::token_service::TokenService;

/// 게이트 판정 결과
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// 통과. 검증된 클레임을 함께 전달합니다.
    Allow(SessionClaims),
    /// 로그인 페이지로 보냅니다.
    Redirect { clear_cookie: bool },
}

pub struct SessionGate {
    tokens: Arc<TokenService>,
    directory: Arc<dyn UserDirectory>,
    machine: Arc<MachineTokenCache>,
    config: GateConfig,
}

impl SessionGate {
    pub fn new(
        tokens: Arc<TokenService>,
        directory: Arc<dyn UserDirectory>,
        machine: Arc<MachineTokenCache>,
        config: GateConfig,
    ) -> Self {
        Self {
            tokens,
            directory,
            machine,
            config,
        }
    }

    /// 게이트 대상 경로인지 확인합니다.
    ///
    /// 세그먼트 경계 기준 접두사 매칭이며 `/api` 아래는 절대 대상이 아닙니다.
    pub fn is_protected(&self, path: &str) -> bool {
        if has_prefix(path, "/api") {
            return false;
        }
        self.config
            .protected_prefixes
            .iter()
            .any(|prefix| has_prefix(path, prefix))
    }

    /// 로그인 페이지 주소 (`next`에 원래 경로와 쿼리를 담음)
    pub fn login_redirect(&self, path_and_query: &str) -> String {
        format!(
            "{}?next={}",
            self.config.login_path,
            urlencoding::encode(path_and_query)
        )
    }

    /// 액세스 쿠키 값으로 통과 여부를 판정합니다.
    pub async fn check(&self, access_token: Option<&str>) -> GateDecision {
        let Some(token) = access_token.filter(|token| !token.is_empty()) else {
            return GateDecision::Redirect {
                clear_cookie: false,
            };
        };

        let claims = match self.tokens.verify(token) {
            Ok(verified) => verified.claims,
            Err(rejection) => {
                log::debug!("게이트: 토큰 거부 ({})", rejection);
                return GateDecision::Redirect { clear_cookie: true };
            }
        };

        if !claims.auth_kind.tracks_session() && self.config.allow_rfid_sessions {
            return GateDecision::Allow(claims);
        }

        let Some(session_id) = claims.session_id.clone() else {
            log::debug!(
                "게이트: session_id 없는 세션 (user_id={} auth_kind={})",
                claims.sub,
                claims.auth_kind.as_str()
            );
            return GateDecision::Redirect { clear_cookie: true };
        };

        if claims.unrecorded {
            log::warn!("게이트: 기록되지 않은 세션, 비교 생략 (user_id={})", claims.sub);
            return GateDecision::Allow(claims);
        }

        let Some(machine_token) = self.machine.get_or_refresh().await else {
            log::warn!(
                "게이트: 서비스 계정 토큰을 얻지 못해 세션 비교 생략 (user_id={})",
                claims.sub
            );
            return GateDecision::Allow(claims);
        };

        match self
            .directory
            .load_session_id(&machine_token, &claims.sub)
            .await
        {
            Ok(Some(stored)) if stored == session_id => GateDecision::Allow(claims),
            Ok(Some(_)) => {
                log::info!("게이트: 다른 곳에서 로그인되어 세션 종료 (user_id={})", claims.sub);
                GateDecision::Redirect { clear_cookie: true }
            }
            Ok(None) => {
                log::warn!("게이트: 기록된 session_id 없음, 통과 (user_id={})", claims.sub);
                GateDecision::Allow(claims)
            }
            Err(e) => {
                // 서비스 계정 토큰이 거부되면 다음 요청에서 다시 로그인
                if matches!(e, DirectoryError::Status(401 | 403)) {
                    self.machine.invalidate();
                }
                log::warn!("게이트: session_id 조회 실패, 통과 (user_id={}): {}", claims.sub, e);
                GateDecision::Allow(claims)
            }
        }
    }
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
