//! 테스트용 메모리 디렉터리
//!
//! 호출 내역을 기록하여 로그인 경로별로 어떤 요청이 나갔는지 검증할 수 있습니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::users::user::DirectoryRecord;
use crate::repositories::users::user_repo::{AccessGrant, DirectoryError, UserDirectory};

pub const MACHINE_EMAIL: &str = "machine@vos.ph";
pub const MACHINE_PASSWORD: &str = "machine-pw";

/// 디렉터리에 보낸 요청 기록
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryCall {
    Authenticate { email: String, password: String },
    FindByEmail { token: String, email: String },
    FindByRfId { token: Option<String>, rf_id: String },
    LoadSession { token: String, user_id: String },
    StoreSession { token: String, user_id: String, session_id: String },
}

#[derive(Default)]
pub struct InMemoryDirectory {
    users: Mutex<Vec<(DirectoryRecord, String)>>,
    sessions: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<DirectoryCall>>,
    offline: AtomicBool,
    fail_session_writes: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 사용자와 비밀번호를 등록합니다.
    pub fn with_user(self, record: serde_json::Value, password: &str) -> Self {
        let record: DirectoryRecord =
            serde_json::from_value(record).expect("test record must deserialize");
        self.users
            .lock()
            .unwrap()
            .push((record, password.to_string()));
        self
    }

    /// 활성 사용자 한 명을 등록하는 단축 함수
    pub fn with_active_user(self, id: &str, email: &str, password: &str, rf_id: &str) -> Self {
        self.with_user(
            json!({
                "id": id,
                "email": email,
                "first_name": "Test",
                "last_name": "User",
                "is_admin": 0,
                "status": "active",
                "is_deleted": 0,
                "rf_id": rf_id,
            }),
            password,
        )
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn fail_session_writes(&self, fail: bool) {
        self.fail_session_writes.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_session(&self, user_id: &str) -> Option<String> {
        self.sessions.lock().unwrap().get(user_id).cloned()
    }

    pub fn set_stored_session(&self, user_id: &str, session_id: &str) {
        self.sessions
            .lock()
            .unwrap()
            .insert(user_id.to_string(), session_id.to_string());
    }

    fn record(&self, call: DirectoryCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_online(&self) -> Result<(), DirectoryError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(DirectoryError::Unreachable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn find(&self, predicate: impl Fn(&DirectoryRecord) -> bool) -> Option<DirectoryRecord> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(record, _)| predicate(record))
            .map(|(record, _)| record.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessGrant, DirectoryError> {
        self.record(DirectoryCall::Authenticate {
            email: email.to_string(),
            password: password.to_string(),
        });
        self.check_online()?;

        let machine = email == MACHINE_EMAIL && password == MACHINE_PASSWORD;
        let user = self.users.lock().unwrap().iter().any(|(record, pw)| {
            record.email.as_deref() == Some(email) && pw == password
        });

        if machine || user {
            Ok(AccessGrant {
                access_token: format!("grant:{}", email),
                expires_in_ms: 60_000,
            })
        } else {
            Err(DirectoryError::Status(401))
        }
    }

    async fn find_user_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError> {
        self.record(DirectoryCall::FindByEmail {
            token: token.to_string(),
            email: email.to_string(),
        });
        self.check_online()?;
        Ok(self.find(|record| record.email.as_deref() == Some(email)))
    }

    async fn find_user_by_rf_id(
        &self,
        token: Option<&str>,
        rf_id: &str,
    ) -> Result<Option<DirectoryRecord>, DirectoryError> {
        self.record(DirectoryCall::FindByRfId {
            token: token.map(str::to_string),
            rf_id: rf_id.to_string(),
        });
        self.check_online()?;
        Ok(self.find(|record| record.rf_id.as_deref() == Some(rf_id)))
    }

    async fn load_session_id(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Option<String>, DirectoryError> {
        self.record(DirectoryCall::LoadSession {
            token: token.to_string(),
            user_id: user_id.to_string(),
        });
        self.check_online()?;
        Ok(self.stored_session(user_id))
    }

    async fn store_session_id(
        &self,
        token: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), DirectoryError> {
        self.record(DirectoryCall::StoreSession {
            token: token.to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        });
        self.check_online()?;
        if self.fail_session_writes.load(Ordering::SeqCst) {
            return Err(DirectoryError::Status(503));
        }
        self.set_stored_session(user_id, session_id);
        Ok(())
    }
}
