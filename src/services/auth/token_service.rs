//! JWT 토큰 서명/검증 서비스
//!
//! 세션 클레임에 발급/만료 시각을 더해 HS256으로 서명하고,
//! 검증 실패는 예외가 아닌 [`TokenRejection`] 값으로 돌려줍니다.
//! 호출 측은 다른 쿠키로 재시도하거나 비인증 요청으로 처리하면 됩니다.
//! 폐기(revocation)는 이 계층이 아니라 서버 측 세션 레코드가 담당합니다.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::config::JwtConfig;
use crate::domain::models::token::token::{SessionClaims, TokenClaims};
use crate::errors::{AppResult, ErrorContext};

/// 토큰 검증 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token expired")]
    Expired,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token has no subject")]
    MissingSubject,
}

/// 검증된 토큰
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    pub claims: SessionClaims,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// JWT 토큰 관리 서비스
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// `AUTH_JWT_SECRET`(없으면 개발용 키)으로 서비스를 생성합니다.
    pub fn from_env() -> Self {
        Self::new(&JwtConfig::secret())
    }

    /// 세션 클레임에 서명합니다.
    ///
    /// # Arguments
    ///
    /// * `claims` - 토큰에 담을 세션 클레임
    /// * `ttl_seconds` - 유효 시간 (초). 0 이하이면 이미 만료된 토큰이 만들어집니다.
    pub fn sign(&self, claims: &SessionClaims, ttl_seconds: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let payload = TokenClaims {
            session: claims.clone(),
            iat: now,
            exp: now + ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 서명과 만료를 확인하고 클레임을 꺼냅니다.
    ///
    /// 만료 허용 오차(leeway)는 0초입니다.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenRejection> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            log::debug!("토큰 검증 실패: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                _ => TokenRejection::Malformed,
            }
        })?;

        let TokenClaims { session, iat, exp } = data.claims;
        if !session.has_subject() {
            return Err(TokenRejection::MissingSubject);
        }

        Ok(VerifiedToken {
            claims: session,
            issued_at: iat,
            expires_at: exp,
        })
    }
}
