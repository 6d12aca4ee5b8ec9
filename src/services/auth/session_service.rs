//! 세션 발급 서비스
//!
//! 검증된 사용자에 대해 세션 클레임을 만들고 액세스/리프레시 토큰 쌍을 서명합니다.
//! 비밀번호 로그인 세션에는 새 `session_id`(UUID v4)를 부여하고,
//! [`SessionIssuer::remember`]로 디렉터리 레코드에 기록해 이전 세션을 무효화합니다.
//! 기록에 실패한 세션은 `unrecorded`로 다시 서명되어 게이트의 서버 측 비교를 건너뜁니다.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::models::auth::authentication_request::VerifiedIdentity;
use crate::domain::models::token::token::SessionClaims;
use crate::errors::AppError;
use crate::repositories::users::UserDirectory;
use crate::services::auth::token_service::TokenService;

/// 발급된 세션
#[derive(Clone)]
pub struct IssuedSession {
    pub claims: SessionClaims,
    pub access_token: String,
    pub refresh_token: String,
    /// `session_id` 기록에 사용할 디렉터리 자격 증명
    pub directory_token: Option<String>,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("claims", &self.claims)
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub struct SessionIssuer {
    tokens: Arc<TokenService>,
    directory: Arc<dyn UserDirectory>,
}

impl SessionIssuer {
    pub fn new(tokens: Arc<TokenService>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { tokens, directory }
    }

    /// 세션 클레임을 만들고 토큰 쌍을 서명합니다.
    pub fn issue(&self, identity: &VerifiedIdentity) -> Result<IssuedSession, AppError> {
        let record = &identity.record;
        let session_id = identity
            .auth_kind
            .tracks_session()
            .then(|| Uuid::new_v4().to_string());

        let claims = SessionClaims {
            sub: record.id.clone(),
            email: record.email.clone(),
            name: record.display_name(),
            is_admin: record.is_admin,
            auth_kind: identity.auth_kind,
            session_id,
            unrecorded: false,
        };

        let access_token = self.tokens.sign(&claims, JwtConfig::ACCESS_TTL_SECONDS)?;
        let refresh_token = self.tokens.sign(&claims, JwtConfig::REFRESH_TTL_SECONDS)?;

        Ok(IssuedSession {
            claims,
            access_token,
            refresh_token,
            directory_token: identity.directory_token.clone(),
        })
    }

    /// `session_id`를 디렉터리 레코드에 기록합니다.
    ///
    /// 기록에 실패해도 로그인은 유지됩니다. 에러 로그를 남기고
    /// `unrecorded` 표시를 붙여 토큰 쌍을 다시 서명한 세션을 돌려줍니다.
    pub async fn remember(&self, session: IssuedSession) -> Result<IssuedSession, AppError> {
        let Some(session_id) = session.claims.session_id.clone() else {
            return Ok(session);
        };

        let recorded = match session.directory_token.as_deref() {
            None => {
                log::error!(
                    "session_id 기록 불가 (디렉터리 자격 증명 없음): user_id={}",
                    session.claims.sub
                );
                false
            }
            Some(token) => match self
                .directory
                .store_session_id(token, &session.claims.sub, &session_id)
                .await
            {
                Ok(()) => {
                    log::debug!("session_id 기록 완료: user_id={}", session.claims.sub);
                    true
                }
                Err(e) => {
                    log::error!(
                        "session_id 기록 실패: user_id={} error={}",
                        session.claims.sub,
                        e
                    );
                    false
                }
            },
        };

        if recorded {
            Ok(session)
        } else {
            self.mark_unrecorded(session)
        }
    }

    fn mark_unrecorded(&self, mut session: IssuedSession) -> Result<IssuedSession, AppError> {
        session.claims.unrecorded = true;
        session.access_token = self.tokens.sign(&session.claims, JwtConfig::ACCESS_TTL_SECONDS)?;
        session.refresh_token = self.tokens.sign(&session.claims, JwtConfig::REFRESH_TTL_SECONDS)?;
        Ok(session)
    }
}
