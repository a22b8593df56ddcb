//! # Book Catalog Backend
//!
//! 도서 카탈로그 REST API 서버입니다.
//!
//! ## 기능
//!
//! - **사용자**: 회원가입, 로그인 (JWT 토큰 발급)
//! - **도서**: 생성, 필터 목록 조회, 상세 조회(리뷰 포함), 부분 수정,
//!   소프트 삭제
//! - **리뷰**: 생성, 부분 수정, 소프트 삭제 (도서의 하위 리소스)
//!
//! ## 계층 구조
//!
//! ```text
//! handlers (HTTP) → services (비즈니스 규칙) → repositories (MongoDB)
//! ```
//!
//! 모든 응답은 `{status, message?, data?}` 봉투를 사용하며, 도서와
//! 리뷰는 물리 삭제 없이 `isDeleted` 플래그로만 삭제됩니다.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
