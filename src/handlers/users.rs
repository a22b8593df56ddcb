//! # 사용자 HTTP 핸들러
//!
//! 회원가입과 로그인 엔드포인트입니다. 두 엔드포인트 모두 인증 없이
//! 접근 가능합니다.

use actix_web::{HttpResponse, post, web};
use validator::Validate;

use crate::domain::dto::ApiResponse;
use crate::domain::dto::users::{LoginRequest, RegisterUserRequest};
use crate::errors::AppError;
use crate::services::UserService;

/// 회원가입 핸들러
///
/// # 엔드포인트
///
/// `POST /user/register`
///
/// # 응답
///
/// ## 성공 (201 Created)
/// ```json
/// {
///   "status": true,
///   "message": "회원가입이 완료되었습니다",
///   "data": { "_id": "...", "title": "Mr", "name": "...", ... }
/// }
/// ```
///
/// 응답 `data`에 비밀번호는 포함되지 않습니다.
///
/// ## 실패
///
/// - 400: 검증 실패, 전화번호/이메일 중복
#[post("/register")]
pub async fn register(
    service: web::Data<UserService>,
    payload: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_data(
        "회원가입이 완료되었습니다",
        response,
    )))
}

/// 로그인 핸들러
///
/// # 엔드포인트
///
/// `POST /user/login`
///
/// # 응답
///
/// ## 성공 (200 OK)
///
/// 토큰은 응답 본문의 `data.token`과 `x-api-key` 응답 헤더
/// 양쪽으로 전달됩니다.
///
/// ```json
/// {
///   "status": true,
///   "message": "로그인 성공",
///   "data": { "token": "...", "userId": "...", "exp": 0, "iat": 0 }
/// }
/// ```
///
/// ## 실패
///
/// - 400: 검증 실패
/// - 401: 이메일 또는 비밀번호 불일치
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let data = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-api-key", data.token.clone()))
        .json(ApiResponse::with_data("로그인 성공", data)))
}
