//! 세션 게이트 미들웨어
//!
//! 보호된 페이지 경로로 들어오는 요청을 [`SessionGate`](crate::services::auth::SessionGate)로
//! 판정하고, 거부된 요청은 로그인 페이지로 돌려보냅니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web,
};

use crate::core::AppState;
use crate::middlewares::gate_inner::SessionGateService;

/// 세션 게이트 미들웨어
pub struct SessionGateMiddleware {
    state: web::Data<AppState>,
}

impl SessionGateMiddleware {
    pub fn new(state: web::Data<AppState>) -> Self {
        Self { state }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionGateMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService {
            service: Rc::new(service),
            state: self.state.clone(),
        }))
    }
}
