//! 도메인 모듈
//!
//! - [`entities`] - MongoDB 컬렉션에 저장되는 도메인 엔티티
//! - [`dto`] - HTTP 요청/응답 데이터 구조와 응답 봉투
//! - [`token`] - JWT 클레임과 인증된 사용자 정보

pub mod dto;
pub mod entities;
pub mod token;
