//! # 애플리케이션 진입점
//!
//! 환경 설정 로드, 로깅 초기화, MongoDB 연결, 서비스 조립,
//! HTTP 서버 실행을 담당합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use book_catalog_backend::config::ServerConfig;
use book_catalog_backend::db::Database;
use book_catalog_backend::repositories::{BookRepository, ReviewRepository, UserRepository};
use book_catalog_backend::routes::configure_all_routes;
use book_catalog_backend::services::{BookService, ReviewService, TokenService, UserService};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 조립된 애플리케이션 서비스 묶음
struct AppServices {
    user_service: Arc<UserService>,
    book_service: Arc<BookService>,
    review_service: Arc<ReviewService>,
    token_service: Arc<TokenService>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 도서 카탈로그 서비스 시작중...");

    let database = initialize_database().await;
    let services = assemble_services(database).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(services).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 요청 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: AppServices) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .expect("Rate Limiting 설정 구성 실패");

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let user_service = web::Data::from(services.user_service);
    let book_service = web::Data::from(services.book_service);
    let review_service = web::Data::from(services.review_service);
    let token_service = services.token_service;

    HttpServer::new(move || {
        let cors = configure_cors();
        let token_service = token_service.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(user_service.clone())
            .app_data(book_service.clone())
            .app_data(review_service.clone())
            .configure(|cfg| configure_all_routes(cfg, token_service))
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수에 따라 `.env.dev` 또는 `.env.prod` 파일을
/// 로드합니다. 그 외 값이면 기본 `.env` 파일을 사용합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG` 환경변수를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB 연결을 초기화합니다
///
/// # Panics
///
/// MongoDB 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_database() -> Arc<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    info!("✅ MongoDB 연결 성공");
    database
}

/// 리포지토리와 서비스를 조립합니다
///
/// 컬렉션 인덱스는 여기서 생성됩니다. 인덱스 생성 실패는 치명적이지
/// 않으므로 경고만 남기고 계속 진행합니다.
async fn assemble_services(database: Arc<Database>) -> AppServices {
    let user_repo = Arc::new(UserRepository::new(database.clone()));
    let book_repo = Arc::new(BookRepository::new(database.clone()));
    let review_repo = Arc::new(ReviewRepository::new(database.clone()));

    if let Err(e) = user_repo.create_indexes().await {
        warn!("users 인덱스 생성 실패: {}", e);
    }
    if let Err(e) = book_repo.create_indexes().await {
        warn!("books 인덱스 생성 실패: {}", e);
    }
    if let Err(e) = review_repo.create_indexes().await {
        warn!("reviews 인덱스 생성 실패: {}", e);
    }

    let token_service = Arc::new(TokenService::new());
    let user_service = Arc::new(UserService::new(user_repo, token_service.clone()));
    let book_service = Arc::new(BookService::new(book_repo.clone(), review_repo.clone()));
    let review_service = Arc::new(ReviewService::new(database, book_repo, review_repo));

    AppServices {
        user_service,
        book_service,
        review_service,
        token_service,
    }
}

/// CORS 설정을 구성합니다
///
/// 개발환경에서 로컬호스트 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    RateLimitConfig {
        per_second,
        burst_size,
    }
}
