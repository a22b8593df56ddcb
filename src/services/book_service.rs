//! # 도서 관리 서비스 구현
//!
//! 도서 CRUD의 비즈니스 규칙을 구현합니다.
//!
//! ## 유일성 규칙
//!
//! - **생성**: 제목과 ISBN은 삭제된 도서를 포함해 전역적으로 유일해야
//!   합니다. 삭제된 도서의 제목/ISBN도 재사용할 수 없습니다.
//! - **수정**: 삭제되지 않은 다른 도서와만 충돌을 확인하며, 자기 자신은
//!   제외합니다 (변경 없는 수정 요청이 자기 제목과 충돌하지 않도록).
//!
//! 유일성은 저장소 인덱스가 아닌 서비스 계층에서 확인합니다.
//! 삭제 상태에 따라 생성과 수정의 충돌 범위가 달라 단일 unique
//! 인덱스로는 표현할 수 없기 때문입니다.

use std::sync::Arc;

use mongodb::bson::{Document, doc};

use crate::domain::dto::books::{
    BookListQuery, BookResponse, BookSummary, BookWithReviewData, CreateBookRequest,
    UpdateBookRequest,
};
use crate::domain::dto::reviews::ReviewResponse;
use crate::domain::entities::Book;
use crate::errors::AppError;
use crate::repositories::{BookRepository, ReviewRepository};
use crate::utils::validation::parse_object_id;

/// 도서 관리 비즈니스 로직 서비스
pub struct BookService {
    book_repo: Arc<BookRepository>,
    review_repo: Arc<ReviewRepository>,
}

impl BookService {
    pub fn new(book_repo: Arc<BookRepository>, review_repo: Arc<ReviewRepository>) -> Self {
        Self {
            book_repo,
            review_repo,
        }
    }

    /// 도서 생성
    ///
    /// 제목/ISBN 전역 유일성을 확인한 후 리뷰 카운터 0, Active 상태로
    /// 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - `userId`가 ObjectId 형식이 아님
    /// * `AppError::ConflictError` - 제목 또는 ISBN 중복
    pub async fn create(&self, request: CreateBookRequest) -> Result<BookResponse, AppError> {
        let user_id = parse_object_id(&request.user_id, "userId")?;
        let title = request.title.trim().to_string();
        let isbn = request.isbn.trim().to_string();

        if self.book_repo.title_exists(&title, None, false).await? {
            return Err(AppError::ConflictError(format!(
                "제목 '{}'은(는) 이미 등록되어 있습니다",
                title
            )));
        }

        if self.book_repo.isbn_exists(&isbn, None, false).await? {
            return Err(AppError::ConflictError(format!(
                "ISBN '{}'은(는) 이미 등록되어 있습니다",
                isbn
            )));
        }

        let book = Book::new(
            title,
            request.excerpt,
            user_id,
            isbn,
            request.category,
            request.subcategory,
            request.released_at,
            request.book_cover,
        );

        let saved = self.book_repo.insert(book).await?;
        log::info!("도서 생성 완료: {}", saved.title);

        Ok(BookResponse::from(saved))
    }

    /// 도서 목록 조회
    ///
    /// 삭제되지 않은 도서를 쿼리 필터(userId/category/subcategory)와
    /// AND 조합으로 골라 제목 오름차순 요약 목록으로 반환합니다.
    /// 필터가 하나도 없으면 전체 조회이며, 빈 카탈로그도 200과 빈
    /// 배열로 응답합니다. 404는 필터가 주어졌는데 아무것도 걸리지
    /// 않은 경우에만 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 필터 조건에 맞는 도서가 하나도 없음
    pub async fn list(&self, query: BookListQuery) -> Result<Vec<BookSummary>, AppError> {
        let unfiltered = query.is_unfiltered();
        let mut filter = doc! { "isDeleted": false };

        if let Some(user_id) = &query.user_id {
            filter.insert("userId", parse_object_id(user_id, "userId")?);
        }
        if let Some(category) = &query.category {
            filter.insert("category", category.trim());
        }
        if let Some(subcategory) = &query.subcategory {
            filter.insert("subcategory", subcategory.trim());
        }

        let summaries = self.book_repo.list_summaries(filter).await?;
        resolve_listing(unfiltered, summaries)
    }

    /// 도서 상세 조회
    ///
    /// 도서 전체 필드에 해당 도서의 삭제되지 않은 리뷰 배열을
    /// `reviewData`로 첨부해 반환합니다. 리뷰가 없으면 빈 배열입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 도서가 없거나 이미 삭제됨
    pub async fn get_by_id(
        &self,
        book_id: &str,
    ) -> Result<BookWithReviewData<BookResponse, Vec<ReviewResponse>>, AppError> {
        let id = parse_object_id(book_id, "bookId")?;

        let book = self
            .book_repo
            .find_active_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("도서를 찾을 수 없습니다".to_string()))?;

        let reviews = self
            .review_repo
            .find_active_by_book(&id)
            .await?
            .into_iter()
            .map(ReviewResponse::from)
            .collect();

        Ok(BookWithReviewData {
            book: BookResponse::from(book),
            review_data: reviews,
        })
    }

    /// 도서 부분 수정
    ///
    /// 제공된 필드만 `$set`으로 반영합니다. 제목/ISBN 변경 시 자기 자신을
    /// 제외한 삭제되지 않은 도서와의 충돌만 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 빈 패치
    /// * `AppError::NotFound` - 도서가 없거나 이미 삭제됨
    /// * `AppError::ConflictError` - 제목 또는 ISBN 중복
    pub async fn update(
        &self,
        book_id: &str,
        request: UpdateBookRequest,
    ) -> Result<BookResponse, AppError> {
        let id = parse_object_id(book_id, "bookId")?;

        if request.is_empty() {
            return Err(AppError::ValidationError(
                "수정할 필드를 하나 이상 제공해야 합니다".to_string(),
            ));
        }

        if self.book_repo.find_active_by_id(&id).await?.is_none() {
            return Err(AppError::NotFound("도서를 찾을 수 없습니다".to_string()));
        }

        let mut set_doc = Document::new();

        if let Some(title) = &request.title {
            let title = title.trim().to_string();
            if self.book_repo.title_exists(&title, Some(&id), true).await? {
                return Err(AppError::ConflictError(format!(
                    "제목 '{}'은(는) 이미 등록되어 있습니다",
                    title
                )));
            }
            set_doc.insert("title", title);
        }

        if let Some(isbn) = &request.isbn {
            let isbn = isbn.trim().to_string();
            if self.book_repo.isbn_exists(&isbn, Some(&id), true).await? {
                return Err(AppError::ConflictError(format!(
                    "ISBN '{}'은(는) 이미 등록되어 있습니다",
                    isbn
                )));
            }
            set_doc.insert("ISBN", isbn);
        }

        if let Some(excerpt) = request.excerpt {
            set_doc.insert("excerpt", excerpt);
        }
        if let Some(category) = request.category {
            set_doc.insert("category", category);
        }
        if let Some(subcategory) = request.subcategory {
            set_doc.insert("subcategory", subcategory);
        }
        if let Some(released_at) = request.released_at {
            set_doc.insert("releasedAt", released_at);
        }
        if let Some(book_cover) = request.book_cover {
            set_doc.insert("bookCover", book_cover);
        }

        // 확인과 수정 사이에 동시 삭제된 경우도 404로 처리
        let updated = self
            .book_repo
            .update_active(&id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("도서를 찾을 수 없습니다".to_string()))?;

        log::info!("도서 수정 완료: {}", updated.title);
        Ok(BookResponse::from(updated))
    }

    /// 도서 소프트 삭제
    ///
    /// Active → Deleted 전이만 허용합니다. 존재하지 않는 도서와 이미
    /// 삭제된 도서는 모두 404이지만 서로 다른 메시지로 구분합니다.
    /// 도서 문서는 물리적으로 남으며, 리뷰 문서도 그대로 유지됩니다
    /// (도서가 목록/상세에서 빠지므로 리뷰도 함께 접근 불가).
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 도서가 없거나 이미 삭제됨
    pub async fn soft_delete(&self, book_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(book_id, "bookId")?;

        // 삭제 상태와 무관하게 조회하여 "없음"과 "이미 삭제됨"을 구분
        let book = ensure_deletable(self.book_repo.find_any_by_id(&id).await?)?;

        // 확인과 전이 사이에 동시 삭제된 경우도 "이미 삭제됨"으로 처리
        self.book_repo
            .soft_delete(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("이미 삭제된 도서입니다".to_string()))?;

        log::info!("도서 삭제 완료: {}", book.title);
        Ok(())
    }
}

/// 목록 조회 결과의 빈 집합 처리
///
/// 필터 없는 전체 조회는 빈 카탈로그도 성공이고, 필터가 주어진 경우에만
/// 빈 결과를 404로 변환합니다.
fn resolve_listing(
    unfiltered: bool,
    summaries: Vec<BookSummary>,
) -> Result<Vec<BookSummary>, AppError> {
    if summaries.is_empty() && !unfiltered {
        return Err(AppError::NotFound("도서를 찾을 수 없습니다".to_string()));
    }
    Ok(summaries)
}

/// 소프트 삭제 전이 가드
///
/// "없음"과 "이미 삭제됨"을 서로 다른 404 메시지로 구분합니다.
fn ensure_deletable(book: Option<Book>) -> Result<Book, AppError> {
    match book {
        None => Err(AppError::NotFound("도서를 찾을 수 없습니다".to_string())),
        Some(book) if book.is_deleted => {
            Err(AppError::NotFound("이미 삭제된 도서입니다".to_string()))
        }
        Some(book) => Ok(book),
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;

    use super::*;

    fn sample_summary() -> BookSummary {
        BookSummary {
            id: ObjectId::new(),
            title: "Go".to_string(),
            excerpt: "xxxxxxxxxxxxxxxxxxxx".to_string(),
            user_id: ObjectId::new(),
            category: "tech".to_string(),
            released_at: "2023-05-01".to_string(),
            reviews: 0,
        }
    }

    fn sample_book() -> Book {
        Book::new(
            "Go".to_string(),
            "xxxxxxxxxxxxxxxxxxxx".to_string(),
            ObjectId::new(),
            "1234567890".to_string(),
            "tech".to_string(),
            "lang".to_string(),
            "2023-05-01".to_string(),
            None,
        )
    }

    #[test]
    fn test_unfiltered_empty_listing_is_ok() {
        // 빈 카탈로그의 전체 조회는 200과 빈 배열
        let result = resolve_listing(true, Vec::new());
        assert!(matches!(result, Ok(ref v) if v.is_empty()));
    }

    #[test]
    fn test_filtered_empty_listing_is_not_found() {
        let result = resolve_listing(false, Vec::new());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_non_empty_listing_is_ok_either_way() {
        assert!(resolve_listing(true, vec![sample_summary()]).is_ok());
        assert!(resolve_listing(false, vec![sample_summary()]).is_ok());
    }

    #[test]
    fn test_missing_book_is_not_deletable() {
        let err = ensure_deletable(None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("찾을 수 없습니다")));
    }

    #[test]
    fn test_already_deleted_book_gets_distinct_message() {
        let mut book = sample_book();
        book.is_deleted = true;

        let err = ensure_deletable(Some(book)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("이미 삭제된")));
    }

    #[test]
    fn test_active_book_is_deletable() {
        assert!(ensure_deletable(Some(sample_book())).is_ok());
    }
}
