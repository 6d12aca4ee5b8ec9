//! 보호된 페이지 셸 핸들러
//!
//! 게이트를 통과한 페이지 요청에 현재 세션 정보를 돌려줍니다.
//! 화면 렌더링은 프런트엔드가 담당하고, 여기서는 경로와 사용자만 알려줍니다.
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::{AppError, AppResult};

/// 라우트에 걸리지 않은 요청의 기본 핸들러
///
/// 게이트가 클레임을 남긴 요청(보호된 페이지)만 응답하고 나머지는 `404`입니다.
pub async fn page_shell(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
) -> AppResult<HttpResponse> {
    let Some(user) = user else {
        return Err(AppError::NotFound(format!("No route for {}", req.path())));
    };

    Ok(HttpResponse::Ok().json(json!({
        "ok": true,
        "path": req.path(),
        "user": user,
    })))
}
