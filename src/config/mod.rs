//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! - [`data_config`] - 서버, 환경, 비밀번호 해싱 설정
//! - [`auth_config`] - JWT 인증 설정
//!
//! 민감한 값은 환경 변수로만 제공하며, 기본값은 개발 환경에서만 안전합니다.

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
