//! # HTTP 핸들러 계층
//!
//! 요청 역직렬화와 검증, 서비스 호출, `{status, message, data}` 응답
//! 봉투 구성을 담당합니다. 비즈니스 규칙은 서비스 계층에 있습니다.

pub mod books;
pub mod reviews;
pub mod users;
