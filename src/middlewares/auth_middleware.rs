//! # JWT 인증 미들웨어
//!
//! `/books` 스코프의 모든 요청에서 JWT 토큰을 검증합니다.
//! 토큰은 `Authorization: Bearer <token>` 헤더 또는 `x-api-key`
//! 헤더로 전달할 수 있습니다 (로그인 응답과 대칭).

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::TokenService;

/// JWT 인증 미들웨어
///
/// 인증 실패 시 핸들러에 도달하기 전에 `{status: false, message}`
/// 봉투와 401로 응답합니다. 성공 시 `AuthenticatedUser`를 요청
/// extensions에 저장합니다.
pub struct AuthMiddleware {
    token_service: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}
