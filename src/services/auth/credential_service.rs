//! # 로그인 자격 증명 검증 서비스
//!
//! 비밀번호 로그인과 RFID 로그인을 디렉터리 레코드와 대조해
//! 공통 결과 [`VerifiedIdentity`]로 돌려줍니다.
//! RFID 경로는 사용자 비밀번호를 읽거나 전송하지 않습니다.

use std::sync::Arc;

use crate::caching::machine_token::MachineTokenCache;
use crate::domain::entities::users::user::DirectoryRecord;
use crate::domain::models::auth::authentication_request::{Credential, VerifiedIdentity};
use crate::domain::models::token::token::AuthKind;
use crate::errors::AppError;
use crate::repositories::users::{DirectoryError, UserDirectory};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const USER_NOT_FOUND: &str = "User not found";
const RFID_NOT_FOUND: &str = "RFID not registered";
const ACCOUNT_DISABLED: &str = "Account is disabled";

pub struct CredentialVerifier {
    directory: Arc<dyn UserDirectory>,
    machine: Arc<MachineTokenCache>,
}

impl CredentialVerifier {
    pub fn new(directory: Arc<dyn UserDirectory>, machine: Arc<MachineTokenCache>) -> Self {
        Self { directory, machine }
    }

    /// 자격 증명을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 비밀번호 불일치 또는 디렉터리 조회 실패
    /// * `NotFound` - 일치하는 레코드 없음
    /// * `AccountDisabled` - 삭제되었거나 비활성인 계정
    /// * `ConfigurationError` - `DIRECTUS_URL` 미설정
    pub async fn verify(&self, credential: Credential) -> Result<VerifiedIdentity, AppError> {
        match credential {
            Credential::Password { email, password } => {
                self.verify_password(&email, &password).await
            }
            Credential::Rfid { rf } => self.verify_rfid(&rf).await,
        }
    }

    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifiedIdentity, AppError> {
        let grant = self
            .directory
            .authenticate(email, password)
            .await
            .map_err(|e| match e {
                DirectoryError::NotConfigured => configuration_error(e),
                other => {
                    log::info!("비밀번호 로그인 거부 ({}): {}", email, other);
                    AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
                }
            })?;

        // 서비스 계정이 있으면 그 권한으로, 없으면 사용자 본인 토큰으로 조회
        let token = match self.machine.get_or_refresh().await {
            Some(machine_token) => machine_token,
            None => grant.access_token,
        };

        let record = self
            .directory
            .find_user_by_email(&token, email)
            .await
            .map_err(lookup_error)?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        ensure_eligible(&record)?;
        log::info!("비밀번호 로그인 성공: user_id={}", record.id);

        Ok(VerifiedIdentity {
            record,
            auth_kind: AuthKind::Password,
            directory_token: Some(token),
        })
    }

    async fn verify_rfid(&self, rf: &str) -> Result<VerifiedIdentity, AppError> {
        let token = self.machine.get_or_refresh().await;

        let record = self
            .directory
            .find_user_by_rf_id(token.as_deref(), rf)
            .await
            .map_err(lookup_error)?
            .ok_or_else(|| AppError::NotFound(RFID_NOT_FOUND.to_string()))?;

        ensure_eligible(&record)?;
        log::info!("RFID 로그인 성공: user_id={}", record.id);

        Ok(VerifiedIdentity {
            record,
            auth_kind: AuthKind::Rfid,
            directory_token: token,
        })
    }
}

fn ensure_eligible(record: &DirectoryRecord) -> Result<(), AppError> {
    if record.is_eligible() {
        Ok(())
    } else {
        log::info!(
            "비활성 계정 로그인 시도: user_id={} deleted={} inactive={}",
            record.id,
            record.is_deleted(),
            record.is_inactive()
        );
        Err(AppError::AccountDisabled(ACCOUNT_DISABLED.to_string()))
    }
}

fn configuration_error(e: DirectoryError) -> AppError {
    AppError::ConfigurationError(e.to_string())
}

fn lookup_error(e: DirectoryError) -> AppError {
    match e {
        DirectoryError::NotConfigured => configuration_error(e),
        other => {
            log::warn!("디렉터리 사용자 조회 실패: {}", other);
            AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
        }
    }
}
