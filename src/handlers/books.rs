//! # 도서 HTTP 핸들러
//!
//! 도서 CRUD 엔드포인트입니다. `/books` 스코프는 인증 미들웨어로
//! 보호되며, 토큰이 없거나 유효하지 않으면 핸들러에 도달하기 전에
//! 401로 거부됩니다.

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::domain::dto::ApiResponse;
use crate::domain::dto::books::{BookListQuery, CreateBookRequest, UpdateBookRequest};
use crate::errors::AppError;
use crate::services::BookService;

/// 도서 생성 핸들러
///
/// # 엔드포인트
///
/// `POST /books`
///
/// # 응답
///
/// ## 성공 (201 Created)
/// ```json
/// {
///   "status": true,
///   "message": "도서가 등록되었습니다",
///   "data": { "_id": "...", "title": "...", "reviews": 0, ... }
/// }
/// ```
///
/// ## 실패
///
/// - 400: 검증 실패, 제목/ISBN 중복
#[post("")]
pub async fn create_book(
    service: web::Data<BookService>,
    payload: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_data("도서가 등록되었습니다", response)))
}

/// 도서 목록 조회 핸들러
///
/// 삭제되지 않은 도서를 제목 오름차순 요약 목록으로 반환합니다.
///
/// # 엔드포인트
///
/// `GET /books?userId=&category=&subcategory=`
///
/// 쿼리 필터는 모두 선택이며, 존재하는 필터는 AND로 조합됩니다.
///
/// # 응답
///
/// - 200: 요약 목록 (`_id`, `title`, `excerpt`, `userId`, `category`,
///   `releasedAt`, `reviews`)
/// - 404: 조건에 맞는 도서 없음
#[get("")]
pub async fn list_books(
    service: web::Data<BookService>,
    query: web::Query<BookListQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let summaries = service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("도서 목록 조회 성공", summaries)))
}

/// 도서 상세 조회 핸들러
///
/// # 엔드포인트
///
/// `GET /books/{book_id}`
///
/// # 응답
///
/// - 200: 도서 전체 필드 + `reviewData` (삭제되지 않은 리뷰 배열,
///   없으면 빈 배열)
/// - 400: `book_id`가 ObjectId 형식이 아님
/// - 404: 도서가 없거나 이미 삭제됨
#[get("/{book_id}")]
pub async fn get_book(
    service: web::Data<BookService>,
    book_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = service.get_by_id(&book_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("도서 조회 성공", response)))
}

/// 도서 수정 핸들러
///
/// # 엔드포인트
///
/// `PUT /books/{book_id}`
///
/// 제공된 필드만 수정하는 부분 수정입니다. 빈 본문은 400입니다.
///
/// # 응답
///
/// - 200: 수정된 도서 전체 필드
/// - 400: 검증 실패, 빈 패치, 제목/ISBN 중복
/// - 404: 도서가 없거나 이미 삭제됨
#[put("/{book_id}")]
pub async fn update_book(
    service: web::Data<BookService>,
    book_id: web::Path<String>,
    payload: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.update(&book_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("도서가 수정되었습니다", response)))
}

/// 도서 소프트 삭제 핸들러
///
/// # 엔드포인트
///
/// `DELETE /books/{book_id}`
///
/// # 응답
///
/// - 200: 삭제 완료 (본문에 `data` 없음)
/// - 404: 도서가 없거나 이미 삭제됨 (재삭제 요청 포함)
#[delete("/{book_id}")]
pub async fn delete_book(
    service: web::Data<BookService>,
    book_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.soft_delete(&book_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message_only("도서가 삭제되었습니다")))
}
