//! # 비즈니스 로직 서비스 계층
//!
//! 핸들러와 리포지토리 사이에서 도메인 규칙을 구현합니다.
//! 각 서비스는 `web::Data`로 주입되어 핸들러에서 공유됩니다.

pub mod book_service;
pub mod review_service;
pub mod token_service;
pub mod user_service;

pub use book_service::BookService;
pub use review_service::ReviewService;
pub use token_service::TokenService;
pub use user_service::UserService;
