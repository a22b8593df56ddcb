//! # 리뷰 HTTP 핸들러
//!
//! 리뷰는 도서의 하위 리소스로만 접근합니다 (`/books/{book_id}/review`).
//! 모든 리뷰 엔드포인트는 인증 미들웨어 뒤에 있습니다.

use actix_web::{HttpResponse, delete, post, put, web};
use validator::Validate;

use crate::domain::dto::ApiResponse;
use crate::domain::dto::reviews::{CreateReviewRequest, UpdateReviewRequest};
use crate::errors::AppError;
use crate::services::ReviewService;

/// 리뷰 생성 핸들러
///
/// # 엔드포인트
///
/// `POST /books/{book_id}/review`
///
/// # 응답
///
/// ## 성공 (201 Created)
///
/// `data`는 증가된 `reviews` 카운터가 반영된 도서에 새 리뷰를
/// `reviewData`로 첨부한 형태입니다.
///
/// ## 실패
///
/// - 400: 검증 실패 (본문 2-1000자, 평점 1-5 정수)
/// - 404: 도서가 없거나 이미 삭제됨
#[post("/{book_id}/review")]
pub async fn create_review(
    service: web::Data<ReviewService>,
    book_id: web::Path<String>,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create(&book_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_data("리뷰가 등록되었습니다", response)))
}

/// 리뷰 수정 핸들러
///
/// # 엔드포인트
///
/// `PUT /books/{book_id}/review/{review_id}`
///
/// 제공된 필드만 수정합니다. `reviewedBy`를 생략하면 기존 작성자
/// 이름이 유지됩니다.
///
/// # 응답
///
/// - 200: 도서 + 수정된 리뷰 (`reviewData`)
/// - 400: 검증 실패, 빈 패치
/// - 404: 도서/리뷰가 없거나 이미 삭제됨, 리뷰가 해당 도서의 것이 아님
#[put("/{book_id}/review/{review_id}")]
pub async fn update_review(
    service: web::Data<ReviewService>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (book_id, review_id) = path.into_inner();
    let response = service
        .update(&book_id, &review_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("리뷰가 수정되었습니다", response)))
}

/// 리뷰 소프트 삭제 핸들러
///
/// # 엔드포인트
///
/// `DELETE /books/{book_id}/review/{review_id}`
///
/// 리뷰 삭제 표시와 도서 카운터 감소가 한 트랜잭션으로 처리됩니다.
///
/// # 응답
///
/// - 200: 삭제 완료
/// - 404: 도서/리뷰가 없거나 이미 삭제됨 (이 경우 카운터 불변)
#[delete("/{book_id}/review/{review_id}")]
pub async fn delete_review(
    service: web::Data<ReviewService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (book_id, review_id) = path.into_inner();
    service.soft_delete(&book_id, &review_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message_only("리뷰가 삭제되었습니다")))
}
