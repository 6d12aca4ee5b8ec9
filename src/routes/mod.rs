//! API 라우트 설정 모듈
//!
//! 인증 엔드포인트와 헬스체크를 등록하고, 라우트에 걸리지 않은 요청은
//! 보호 페이지 셸 핸들러로 보냅니다.
//!
//! # Routes
//!
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | POST | `/auth/login` | 비밀번호 로그인 |
//! | POST | `/auth/login-rfid` | RFID 로그인 |
//! | GET | `/auth/me` | 현재 사용자 |
//! | GET | `/auth/session` | 사용자 + 액세스 토큰 |
//! | POST | `/auth/refresh` | 액세스 토큰 갱신 |
//! | POST | `/auth/logout` | 세션 쿠키 삭제 |
//! | GET | `/health` | 헬스체크 |
//! | * | 보호 경로 (`/dashboard` 등) | 페이지 셸 (세션 게이트 통과 시) |

use crate::errors::AppError;
use crate::handlers;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 잘못된 JSON 본문도 다른 에러와 같은 형태로 응답
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }));

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);

    // 보호 페이지는 게이트가 남긴 세션으로 응답
    cfg.default_service(web::to(handlers::pages::page_shell));
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 엔드포인트는 세션 게이트 대상이 아니며,
/// 세션 쿠키를 직접 읽거나 씁니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::login_rfid)
            .service(handlers::auth::logout)
            .service(handlers::session::me)
            .service(handlers::session::session)
            .service(handlers::session::refresh),
    );
}

/// 헬스체크 엔드포인트
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "vos_auth_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "vos_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::cookie::time::Duration;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::config::{
        CookieConfig, DirectusConfig, Environment, GateConfig, JwtConfig, MachineCredentials,
    };
    use crate::core::AppState;
    use crate::domain::models::token::token::{AuthKind, SessionClaims};
    use crate::middlewares::SessionGateMiddleware;
    use crate::repositories::users::DirectusUserRepository;
    use crate::repositories::users::in_memory::{
        DirectoryCall, InMemoryDirectory, MACHINE_EMAIL, MACHINE_PASSWORD,
    };
    use crate::services::auth::TokenService;
    use crate::utils::clock::SystemClock;

    const EMAIL: &str = "clerk@vos.ph";
    const PASSWORD: &str = "s3cret";
    const RFID: &str = "0012345678";
    const ACCESS: &str = CookieConfig::DEFAULT_ACCESS_NAME;
    const REFRESH: &str = CookieConfig::DEFAULT_REFRESH_NAME;

    fn directory() -> Arc<InMemoryDirectory> {
        Arc::new(InMemoryDirectory::new().with_active_user("1001", EMAIL, PASSWORD, RFID))
    }

    fn state_with(directory: Arc<dyn crate::repositories::users::UserDirectory>) -> web::Data<AppState> {
        state_with_gate(directory, GateConfig::default())
    }

    fn state_with_gate(
        directory: Arc<dyn crate::repositories::users::UserDirectory>,
        gate: GateConfig,
    ) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            directory,
            TokenService::new("routes-secret"),
            Some(MachineCredentials {
                email: MACHINE_EMAIL.to_string(),
                password: MACHINE_PASSWORD.to_string(),
            }),
            CookieConfig::for_environment(&Environment::Test),
            gate,
            Arc::new(SystemClock),
        ))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .wrap(SessionGateMiddleware::new($state.clone()))
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
        resp.response()
            .cookies()
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
    }

    fn login_request() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
    }

    fn get_with_cookie(uri: &str, cookie: String) -> test::TestRequest {
        test::TestRequest::get()
            .uri(uri)
            .insert_header((header::COOKIE, cookie))
    }

    #[actix_web::test]
    async fn test_health_check() {
        let state = state_with(directory());
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_password_login_sets_cookies_and_records_session() {
        let directory = directory();
        let state = state_with(directory.clone());
        let app = app!(state);

        let resp = test::call_service(&app, login_request().to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let access = cookie_value(&resp, ACCESS).unwrap();
        assert!(cookie_value(&resp, REFRESH).is_some());
        let set_cookie = resp.response().cookies().find(|c| c.name() == ACCESS).unwrap();
        assert_eq!(set_cookie.http_only(), Some(true));
        assert_eq!(set_cookie.max_age(), Some(Duration::seconds(900)));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["user"]["id"], "1001");
        assert_eq!(body["user"]["email"], EMAIL);
        assert_eq!(body["user"]["auth_kind"], "password");
        assert!(body.get("access_token").is_none());

        let claims = state.tokens.verify(&access).unwrap().claims;
        assert_eq!(directory.stored_session("1001"), claims.session_id);
    }

    #[actix_web::test]
    async fn test_login_error_statuses() {
        let directory = Arc::new(
            InMemoryDirectory::new()
                .with_active_user("1001", EMAIL, PASSWORD, RFID)
                .with_user(json!({"id": 2, "email": "idle@vos.ph", "status": "inactive"}), PASSWORD),
        );
        let state = state_with(directory.clone());
        let app = app!(state);

        let cases = [
            (json!({"email": EMAIL, "password": "wrong"}), StatusCode::UNAUTHORIZED),
            (json!({"email": "idle@vos.ph", "password": PASSWORD}), StatusCode::FORBIDDEN),
            (json!({"email": "not-an-email", "password": PASSWORD}), StatusCode::BAD_REQUEST),
            (json!({"email": EMAIL, "password": ""}), StatusCode::BAD_REQUEST),
            (json!({"email": EMAIL}), StatusCode::BAD_REQUEST),
        ];

        for (payload, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/auth/login")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "{}", payload);
            assert!(cookie_value(&resp, ACCESS).is_none());

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["ok"], false);
            assert!(body["message"].is_string());
        }

        // 형식 오류는 디렉터리에 닿지 않음
        let bad_email_calls = directory
            .calls()
            .iter()
            .filter(|call| matches!(call, DirectoryCall::Authenticate { email, .. } if email == "not-an-email"))
            .count();
        assert_eq!(bad_email_calls, 0);
    }

    #[actix_web::test]
    async fn test_missing_directory_url_is_server_error() {
        let repo = DirectusUserRepository::new(&DirectusConfig::default());
        let state = state_with(Arc::new(repo));
        let app = app!(state);

        let resp = test::call_service(&app, login_request().to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Server misconfiguration");
    }

    #[actix_web::test]
    async fn test_second_login_locks_out_first_session() {
        let state = state_with(directory());
        let app = app!(state);

        let first = test::call_service(&app, login_request().to_request()).await;
        let first_access = cookie_value(&first, ACCESS).unwrap();

        let resp = test::call_service(
            &app,
            get_with_cookie("/dashboard", format!("{}={}", ACCESS, first_access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let second = test::call_service(&app, login_request().to_request()).await;
        let second_access = cookie_value(&second, ACCESS).unwrap();

        let resp = test::call_service(
            &app,
            get_with_cookie("/dashboard/sales", format!("{}={}", ACCESS, first_access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fdashboard%2Fsales"
        );
        assert_eq!(cookie_value(&resp, ACCESS).as_deref(), Some(""));

        let resp = test::call_service(
            &app,
            get_with_cookie("/dashboard", format!("{}={}", ACCESS, second_access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["path"], "/dashboard");
        assert_eq!(body["user"]["user_id"], "1001");
    }

    #[actix_web::test]
    async fn test_login_survives_failed_session_write() {
        let directory = directory();
        directory.set_stored_session("1001", "previous-login");
        directory.fail_session_writes(true);
        let state = state_with(directory.clone());
        let app = app!(state);

        let login = test::call_service(&app, login_request().to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let access = cookie_value(&login, ACCESS).unwrap();
        assert!(state.tokens.verify(&access).unwrap().claims.unrecorded);
        assert_eq!(directory.stored_session("1001").as_deref(), Some("previous-login"));

        let resp = test::call_service(
            &app,
            get_with_cookie("/dashboard", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    fn rfid_login_request() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/auth/login-rfid")
            .set_json(json!({ "rf": format!("  {}  ", RFID) }))
    }

    #[actix_web::test]
    async fn test_rfid_session_redirected_from_protected_pages_by_default() {
        let state = state_with(directory());
        let app = app!(state);

        let login = test::call_service(&app, rfid_login_request().to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let access = cookie_value(&login, ACCESS).unwrap();

        let resp = test::call_service(
            &app,
            get_with_cookie("/admin/foo", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fadmin%2Ffoo"
        );
        assert_eq!(cookie_value(&resp, ACCESS).as_deref(), Some(""));

        // 게이트 밖의 세션 조회는 그대로 동작
        let resp = test::call_service(
            &app,
            get_with_cookie("/auth/me", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_rfid_login_is_independent_of_password_session() {
        let directory = directory();
        let gate = GateConfig {
            allow_rfid_sessions: true,
            ..GateConfig::default()
        };
        let state = state_with_gate(directory.clone(), gate);
        let app = app!(state);

        let resp = test::call_service(&app, rfid_login_request().to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let access = cookie_value(&resp, ACCESS).unwrap();

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["auth_kind"], "rfid");

        let claims = state.tokens.verify(&access).unwrap().claims;
        assert_eq!(claims.session_id, None);

        for call in directory.calls() {
            match call {
                DirectoryCall::StoreSession { .. } => panic!("RFID login wrote a session_id"),
                DirectoryCall::Authenticate { email, password } => {
                    assert_eq!(email, MACHINE_EMAIL);
                    assert_eq!(password, MACHINE_PASSWORD);
                }
                _ => {}
            }
        }

        // 비밀번호 세션이 기록되어 있어도 RFID 세션은 페이지 접근 가능
        directory.set_stored_session("1001", "some-password-session");
        let resp = test::call_service(
            &app,
            get_with_cookie("/hr", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_rfid_login_rejects_blank_and_unknown_tags() {
        let state = state_with(directory());
        let app = app!(state);

        for (rf, expected) in [
            ("   ", StatusCode::BAD_REQUEST),
            ("", StatusCode::BAD_REQUEST),
            ("9999", StatusCode::NOT_FOUND),
        ] {
            let req = test::TestRequest::post()
                .uri("/auth/login-rfid")
                .set_json(json!({ "rf": rf }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "rf={:?}", rf);
        }
    }

    #[actix_web::test]
    async fn test_me_prefers_access_then_refresh() {
        let state = state_with(directory());
        let app = app!(state);

        let login = test::call_service(&app, login_request().to_request()).await;
        let access = cookie_value(&login, ACCESS).unwrap();
        let refresh = cookie_value(&login, REFRESH).unwrap();

        let resp = test::call_service(
            &app,
            get_with_cookie("/auth/me", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        // 액세스 쿠키가 깨져 있으면 리프레시 쿠키로 응답
        let resp = test::call_service(
            &app,
            get_with_cookie(
                "/auth/me",
                format!("{}=broken; {}={}", ACCESS, REFRESH, refresh),
            ).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["user"]["id"], "1001");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/auth/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_session_returns_access_token() {
        let state = state_with(directory());
        let app = app!(state);

        let login = test::call_service(&app, login_request().to_request()).await;
        let access = cookie_value(&login, ACCESS).unwrap();
        let refresh = cookie_value(&login, REFRESH).unwrap();

        let resp = test::call_service(
            &app,
            get_with_cookie("/auth/session", format!("{}={}", ACCESS, access)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["accessToken"], access.as_str());
        assert_eq!(body["user"]["id"], "1001");

        // 리프레시 쿠키만으로는 세션을 돌려주지 않음
        let resp = test::call_service(
            &app,
            get_with_cookie("/auth/session", format!("{}={}", REFRESH, refresh)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_refresh_reissues_access_cookie_only() {
        let state = state_with(directory());
        let app = app!(state);

        let login = test::call_service(&app, login_request().to_request()).await;
        let refresh = cookie_value(&login, REFRESH).unwrap();
        let original = state
            .tokens
            .verify(&cookie_value(&login, ACCESS).unwrap())
            .unwrap()
            .claims;

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header((header::COOKIE, format!("{}={}", REFRESH, refresh)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(cookie_value(&resp, REFRESH).is_none());

        let reissued = cookie_value(&resp, ACCESS).unwrap();
        assert_eq!(state.tokens.verify(&reissued).unwrap().claims, original);
    }

    #[actix_web::test]
    async fn test_refresh_with_expired_token_clears_cookie() {
        let state = state_with(directory());
        let app = app!(state);

        let expired = state
            .tokens
            .sign(
                &SessionClaims {
                    sub: "1001".to_string(),
                    email: None,
                    name: None,
                    is_admin: false,
                    auth_kind: AuthKind::Rfid,
                    session_id: None,
                    unrecorded: false,
                },
                -JwtConfig::ACCESS_TTL_SECONDS,
            )
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header((header::COOKIE, format!("{}={}", REFRESH, expired)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(cookie_value(&resp, REFRESH).as_deref(), Some(""));

        let req = test::TestRequest::post().uri("/auth/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_logout_clears_both_cookies() {
        let state = state_with(directory());
        let app = app!(state);

        let req = test::TestRequest::post().uri("/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(cookie_value(&resp, ACCESS).as_deref(), Some(""));
        assert_eq!(cookie_value(&resp, REFRESH).as_deref(), Some(""));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "ok": true }));
    }

    #[actix_web::test]
    async fn test_unknown_path_is_not_found() {
        let state = state_with(directory());
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
