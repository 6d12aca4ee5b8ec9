//! 외부 사용자 디렉터리 리포지토리
//!
//! Directus 스타일의 항목/컬렉션 REST API에 대한 데이터 접근을 담당합니다.
//!
//! | 용도 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | 자격 증명 확인 | `/auth/login` | POST |
//! | 사용자 조회 (이메일/RFID) | `/items/{collection}?filter[..][_eq]=..` | GET |
//! | 세션 ID 조회 | `/items/{collection}/{id}?fields=session_id` | GET |
//! | 세션 ID 기록 | `/items/{collection}/{id}` | PATCH |
//!
//! 모든 응답은 `{"data": ...}` 봉투로 감싸져 도착합니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::config::DirectusConfig;
use crate::domain::entities::users::user::{DIRECTORY_FIELDS, DirectoryRecord};

/// 디렉터리 접근 에러
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// `DIRECTUS_URL` 미설정
    #[error("directory base url is not configured")]
    NotConfigured,

    /// 네트워크 오류 (연결 실패, 타임아웃 등)
    #[error("directory unreachable: {0}")]
    Unreachable(String),

    /// 2xx 이외의 응답
    #[error("directory responded with status {0}")]
    Status(u16),

    /// 응답 JSON 파싱 실패
    #[error("malformed directory response: {0}")]
    Decode(String),
}

/// 자격 증명 확인 결과로 받은 액세스 자격 증명
#[derive(Clone, PartialEq)]
pub struct AccessGrant {
    pub access_token: String,
    /// 유효 시간 (밀리초)
    pub expires_in_ms: i64,
}

impl std::fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGrant")
            .field("access_token", &"***")
            .field("expires_in_ms", &self.expires_in_ms)
            .finish()
    }
}

/// 외부 사용자 디렉터리
///
/// 로그인 검증, 세션 게이트, 세션 발급이 이 trait 하나로 디렉터리에 접근합니다.
/// 테스트에서는 메모리 구현으로 교체합니다.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 이메일/비밀번호로 자격 증명을 확인합니다.
    async fn authenticate(&self, email: &str, password: &str)
        -> Result<AccessGrant, DirectoryError>;

    /// 이메일로 사용자 레코드를 조회합니다.
    async fn find_user_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError>;

    /// RFID 태그로 사용자 레코드를 조회합니다. 토큰 없이 공개 권한으로도 호출될 수 있습니다.
    async fn find_user_by_rf_id(
        &self,
        token: Option<&str>,
        rf_id: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError>;

    /// 사용자의 현재 `session_id`를 읽습니다.
    async fn load_session_id(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Option<String>, DirectoryError>;

    /// 사용자의 `session_id`를 덮어씁니다.
    async fn store_session_id(
        &self,
        token: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), DirectoryError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct LoginData {
    access_token: String,
    #[serde(default)]
    expires: Option<i64>,
}

#[derive(Deserialize)]
struct SessionField {
    #[serde(default)]
    session_id: Option<String>,
}

/// Directus 로그인 토큰 기본 유효 시간 (15분)
const DEFAULT_GRANT_MS: i64 = 15 * 60 * 1000;

/// reqwest 기반 Directus 디렉터리 구현
#[derive(Clone)]
pub struct DirectusUserRepository {
    client: reqwest::Client,
    base_url: Option<String>,
    collection: String,
}

impl DirectusUserRepository {
    pub fn new(config: &DirectusConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("HTTP 클라이언트 설정 실패, 기본 클라이언트 사용: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: config.base_url.clone(),
            collection: config.user_collection.clone(),
        }
    }

    fn url(&self, path: &str) -> Result<String, DirectoryError> {
        let base = self.base_url.as_deref().ok_or(DirectoryError::NotConfigured)?;
        Ok(format!("{}{}", base, path))
    }

    fn items_url(&self) -> Result<String, DirectoryError> {
        self.url(&format!("/items/{}", self.collection))
    }

    fn item_url(&self, user_id: &str) -> Result<String, DirectoryError> {
        self.url(&format!(
            "/items/{}/{}",
            self.collection,
            urlencoding::encode(user_id)
        ))
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DirectoryError> {
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    async fn find_one(
        &self,
        token: Option<&str>,
        field: &str,
        value: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError> {
        let filter_key = format!("filter[{}][_eq]", field);
        let mut request = self.client.get(self.items_url()?).query(&[
            (filter_key.as_str(), value),
            ("fields", DIRECTORY_FIELDS),
            ("limit", "1"),
        ]);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(network_error)?;
        let records: Vec<DirectoryRecord> = Self::read_envelope(response).await?;
        Ok(records.into_iter().next())
    }
}

fn network_error(e: reqwest::Error) -> DirectoryError {
    DirectoryError::Unreachable(e.to_string())
}

#[async_trait]
impl UserDirectory for DirectusUserRepository {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessGrant, DirectoryError> {
        let response = self
            .client
            .post(self.url("/auth/login")?)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network_error)?;

        let data: LoginData = Self::read_envelope(response).await?;
        if data.access_token.is_empty() {
            return Err(DirectoryError::Decode("empty access_token".to_string()));
        }

        Ok(AccessGrant {
            access_token: data.access_token,
            expires_in_ms: data.expires.filter(|ms| *ms > 0).unwrap_or(DEFAULT_GRANT_MS),
        })
    }

    async fn find_user_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError> {
        self.find_one(Some(token), "email", email).await
    }

    async fn find_user_by_rf_id(
        &self,
        token: Option<&str>,
        rf_id: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError> {
        self.find_one(token, "rf_id", rf_id).await
    }

    async fn load_session_id(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Option<String>, DirectoryError> {
        let response = self
            .client
            .get(self.item_url(user_id)?)
            .query(&[("fields", "session_id")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let field: SessionField = Self::read_envelope(response).await?;
        Ok(field.session_id.filter(|sid| !sid.is_empty()))
    }

    async fn store_session_id(
        &self,
        token: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), DirectoryError> {
        let response = self
            .client
            .patch(self.item_url(user_id)?)
            .bearer_auth(token)
            .json(&json!({ "session_id": session_id }))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }
        Ok(())
    }
}
