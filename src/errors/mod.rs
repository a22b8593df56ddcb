//! # Application Error Handling
//!
//! 도서 카탈로그 서비스의 통합 에러 타입입니다.
//! `thiserror`로 에러 체인을 구성하고, `actix_web::ResponseError` 구현을 통해
//! 모든 에러를 `{status: false, message}` 응답 봉투로 자동 변환합니다.
//!
//! ## HTTP 상태 코드 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `ConflictError` | 400 Bad Request | 제목/ISBN/전화번호/이메일 중복 |
//! | `NotFound` | 404 Not Found | 리소스 없음 또는 이미 삭제됨 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 토큰 오류 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 (내용 비공개) |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 (내용 비공개) |

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 검증은 어떤 쓰기 작업보다도 먼저 전부 수행되므로(fail fast),
/// 에러가 반환된 요청은 저장소를 변경하지 않은 상태로 종료됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 실패. 필드별 메시지를 담아 400으로 응답합니다.
    #[error("{0}")]
    ValidationError(String),

    /// 유일성 제약 위반 (도서 제목/ISBN, 사용자 전화번호/이메일).
    /// 의미상으로는 충돌이지만 와이어 코드는 400을 사용합니다.
    #[error("{0}")]
    ConflictError(String),

    /// 요청된 리소스가 없거나 이미 소프트 삭제된 경우.
    #[error("{0}")]
    NotFound(String),

    /// 로그인 자격 증명 불일치 또는 토큰 검증 실패.
    #[error("{0}")]
    AuthenticationError(String),

    /// MongoDB 연산 실패. 원본 메시지는 서버 로그에만 남깁니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 예상하지 못한 시스템 오류.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// 각 `AppError` 변형을 `{status, message}` 봉투와 상태 코드로 변환합니다.
    ///
    /// 5xx 에러는 상세 내용을 로그에 기록하고 클라이언트에는
    /// 불투명한 메시지만 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ConflictError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::DatabaseError(detail) | AppError::InternalError(detail) => {
                log::error!("내부 오류 발생: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "서버 내부 오류가 발생했습니다".to_string(),
                )
            }
        };

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "status": false,
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_maps_to_400() {
        let error = AppError::ValidationError("제목은 필수입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_maps_to_400() {
        // 중복 ISBN 시나리오는 400으로 응답해야 한다
        let error = AppError::ConflictError("ISBN이 이미 등록되어 있습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_maps_to_404() {
        let error = AppError::NotFound("도서를 찾을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_maps_to_401() {
        let error = AppError::AuthenticationError("이메일 또는 비밀번호가 올바르지 않습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_database_error_is_opaque() {
        let error = AppError::DatabaseError("connection refused to mongodb://internal-host".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // 내부 연결 정보가 클라이언트 메시지에 노출되면 안 된다
        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(!text.contains("internal-host"));
        assert!(text.contains("\"status\":false"));
    }
}
