//! 도메인 엔티티 모듈
//!
//! `users`, `books`, `reviews` 세 컬렉션의 문서 구조를 정의합니다.
//! 필드 이름은 serde rename으로 저장소의 camelCase 스키마에 맞춥니다.

pub mod book;
pub mod review;
pub mod user;

pub use book::Book;
pub use review::Review;
pub use user::{Address, User, UserTitle};
