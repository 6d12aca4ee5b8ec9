//! SessionGateMiddleware 판정 로직
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse, web};
use futures_util::future::LocalBoxFuture;

use crate::core::AppState;
use crate::services::auth::GateDecision;
use crate::utils::cookie_utils::{read_cookie, removal_cookie};

/// 실제 게이트 판정을 수행하는 서비스
pub struct SessionGateService<S> {
    pub service: Rc<S>,
    pub state: web::Data<AppState>,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let state = self.state.clone();

        Box::pin(async move {
            if !state.gate.is_protected(req.path()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let cookies = &state.cookies;
            let access_token = read_cookie(req.headers(), &cookies.access_name);

            match state.gate.check(access_token.as_deref()).await {
                GateDecision::Allow(claims) => {
                    log::debug!("게이트 통과: {} (user_id={})", req.path(), claims.sub);
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                GateDecision::Redirect { clear_cookie } => {
                    let path_and_query = req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.as_str().to_string())
                        .unwrap_or_else(|| req.path().to_string());
                    let location = state.gate.login_redirect(&path_and_query);

                    let mut response = HttpResponse::TemporaryRedirect();
                    response.insert_header((header::LOCATION, location));
                    if clear_cookie {
                        response.cookie(removal_cookie(&cookies.access_name, cookies.secure));
                    }

                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response.finish()).map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}
