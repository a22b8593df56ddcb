//! 데이터 액세스 계층
//!
//! 컬렉션별 리포지토리가 MongoDB 연산을 담당합니다.
//! 소프트 삭제 가드(`isDeleted: false` 필터)는 이 계층의
//! `find_active_*` / `soft_delete*` 메서드에 모여 있습니다.

pub mod book_repo;
pub mod review_repo;
pub mod user_repo;

pub use book_repo::BookRepository;
pub use review_repo::ReviewRepository;
pub use user_repo::UserRepository;
