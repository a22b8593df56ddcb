//! # HTTP 미들웨어
//!
//! 보호된 라우트 스코프에 적용되는 인증 미들웨어입니다.

pub mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::AuthMiddleware;
