//! # 라우트 구성
//!
//! 기능별 라우트를 통합하여 애플리케이션에 등록합니다.
//!
//! ## 라우트 구조
//!
//! ### Public 라우트 (인증 불필요)
//! - `POST /user/register` - 회원가입
//! - `POST /user/login` - 로그인 (토큰 발급)
//! - `GET /health` - 헬스체크
//!
//! ### Protected 라우트 (JWT 토큰 필요)
//! - `POST /books` - 도서 생성
//! - `GET /books` - 도서 목록 조회
//! - `GET /books/{book_id}` - 도서 상세 조회
//! - `PUT /books/{book_id}` - 도서 수정
//! - `DELETE /books/{book_id}` - 도서 소프트 삭제
//! - `POST /books/{book_id}/review` - 리뷰 생성
//! - `PUT /books/{book_id}/review/{review_id}` - 리뷰 수정
//! - `DELETE /books/{book_id}/review/{review_id}` - 리뷰 소프트 삭제

use std::sync::Arc;

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use crate::services::TokenService;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::App;
///
/// let app = App::new()
///     .configure(|cfg| configure_all_routes(cfg, token_service.clone()));
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, token_service: Arc<TokenService>) {
    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_book_routes(cfg, token_service);
}

/// 사용자 관련 라우트를 설정합니다
///
/// 회원가입과 로그인은 인증의 진입점이므로 Public입니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::register)
            .service(handlers::users::login),
    );
}

/// 도서/리뷰 라우트를 설정합니다
///
/// `/books` 스코프 전체가 인증 미들웨어 뒤에 있습니다. 리뷰는 도서의
/// 하위 리소스이므로 같은 스코프에 등록됩니다. 구체 경로가 먼저
/// 매칭되도록 리뷰 라우트를 도서 단건 라우트보다 앞에 둡니다.
fn configure_book_routes(cfg: &mut web::ServiceConfig, token_service: Arc<TokenService>) {
    cfg.service(
        web::scope("/books")
            .wrap(AuthMiddleware::new(token_service))
            .service(handlers::reviews::create_review)
            .service(handlers::reviews::update_review)
            .service(handlers::reviews::delete_review)
            .service(handlers::books::create_book)
            .service(handlers::books::list_books)
            .service(handlers::books::get_book)
            .service(handlers::books::update_book)
            .service(handlers::books::delete_book),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 사용됩니다.
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "book_catalog_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
