//! 외부 디렉터리의 사용자 레코드
//!
//! Directus 항목 API가 반환하는 사용자 레코드를 표현합니다.
//! 백엔드 컬럼 타입이 일정하지 않아(`is_deleted`가 숫자, 불리언, 버퍼 래퍼 등으로 도착)
//! 역직렬화 시 태그 없는 열거형으로 받아 하나의 불리언으로 정규화합니다.

use serde::{Deserialize, Serialize};

/// 디렉터리 조회 시 요청하는 필드 목록
///
/// 비밀번호 해시 필드는 절대 요청하지 않습니다.
pub const DIRECTORY_FIELDS: &str =
    "id,email,first_name,last_name,is_admin,status,is_deleted,rf_id";

/// `is_deleted` 컬럼의 가능한 표현
///
/// - `0` / `1`
/// - `true` / `false`
/// - `{"type": "Buffer", "data": [1]}` (BIT 컬럼 래퍼)
/// - `[1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeletedFlag {
    Flag(bool),
    Number(i64),
    Wrapped { data: Vec<i64> },
    List(Vec<i64>),
}

impl DeletedFlag {
    pub fn as_bool(&self) -> bool {
        match self {
            DeletedFlag::Flag(value) => *value,
            DeletedFlag::Number(value) => *value != 0,
            DeletedFlag::Wrapped { data } | DeletedFlag::List(data) => {
                data.first().is_some_and(|value| *value != 0)
            }
        }
    }
}

/// `is_deleted` 값을 불리언으로 정규화합니다.
///
/// 값이 없거나 `null`이면 삭제되지 않은 것으로 간주합니다.
pub fn is_deleted_flag(flag: Option<&DeletedFlag>) -> bool {
    flag.is_some_and(DeletedFlag::as_bool)
}

/// 디렉터리 사용자 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// 사용자 고유 ID (숫자 또는 문자열 ID를 문자열로 통일)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_loose_bool")]
    pub is_admin: bool,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub is_deleted: Option<DeletedFlag>,

    #[serde(default)]
    pub rf_id: Option<String>,
}

impl DirectoryRecord {
    /// 삭제 여부 (정규화됨)
    pub fn is_deleted(&self) -> bool {
        is_deleted_flag(self.is_deleted.as_ref())
    }

    /// 비활성 상태 여부
    pub fn is_inactive(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("inactive"))
    }

    /// 로그인 가능 여부: 삭제되지 않았고 비활성 상태가 아님
    pub fn is_eligible(&self) -> bool {
        !self.is_deleted() && !self.is_inactive()
    }

    /// 화면 표시용 이름 (이름 + 성)
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unsupported user id: {}",
            other
        ))),
    }
}

/// `is_admin`은 불리언, 0/1, 버퍼 래퍼 중 하나로 도착합니다.
fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let flag = Option::<DeletedFlag>::deserialize(deserializer)?;
    Ok(is_deleted_flag(flag.as_ref()))
}
