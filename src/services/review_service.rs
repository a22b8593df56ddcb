//! # 리뷰 관리 서비스 구현
//!
//! 리뷰 생성/수정/소프트 삭제와 도서 리뷰 카운터 일관성을 담당합니다.
//!
//! ## 카운터 일관성
//!
//! 도서의 `reviews` 필드는 해당 도서의 삭제되지 않은 리뷰 수와 항상
//! 일치해야 합니다. 리뷰 문서 쓰기와 카운터 증감은 MongoDB 클라이언트
//! 세션 트랜잭션으로 묶여, 둘 중 하나만 반영된 상태가 관찰되지
//! 않습니다. 감소는 `reviews > 0` 조건으로 0 아래로 내려가지 않습니다.

use std::sync::Arc;

use mongodb::bson::{Document, oid::ObjectId};

use crate::db::Database;
use crate::domain::dto::books::{BookResponse, BookWithReviewData, ProjectedBookResponse};
use crate::domain::dto::reviews::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::domain::entities::{Book, Review};
use crate::errors::AppError;
use crate::repositories::{BookRepository, ReviewRepository};
use crate::utils::validation::parse_object_id;

/// 리뷰 관리 비즈니스 로직 서비스
pub struct ReviewService {
    db: Arc<Database>,
    book_repo: Arc<BookRepository>,
    review_repo: Arc<ReviewRepository>,
}

impl ReviewService {
    pub fn new(
        db: Arc<Database>,
        book_repo: Arc<BookRepository>,
        review_repo: Arc<ReviewRepository>,
    ) -> Self {
        Self {
            db,
            book_repo,
            review_repo,
        }
    }

    /// 리뷰 생성
    ///
    /// 삭제되지 않은 도서에만 리뷰를 달 수 있습니다. 리뷰 저장과 카운터
    /// 증가를 한 트랜잭션으로 처리하고, 증가된 카운터가 반영된 도서에
    /// 새 리뷰를 `reviewData`로 첨부해 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 도서가 없거나 이미 삭제됨
    /// * `AppError::DatabaseError` - 트랜잭션 실패
    pub async fn create(
        &self,
        book_id: &str,
        request: CreateReviewRequest,
    ) -> Result<BookWithReviewData<BookResponse, ReviewResponse>, AppError> {
        let book_id = parse_object_id(book_id, "bookId")?;

        if self.book_repo.find_active_by_id(&book_id).await?.is_none() {
            return Err(AppError::NotFound("도서를 찾을 수 없습니다".to_string()));
        }

        let review = Review::new(
            book_id,
            request.review.trim().to_string(),
            request.rating,
            request.reviewed_by,
        );

        let mut session = self
            .db
            .client()
            .start_session()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        session
            .start_transaction()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let result = self
            .create_in_transaction(&book_id, review, &mut session)
            .await;

        match result {
            Ok((book, review)) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                log::info!("리뷰 생성 완료: 도서 {}", book_id.to_hex());
                Ok(BookWithReviewData {
                    book: BookResponse::from(book),
                    review_data: ReviewResponse::from(review),
                })
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    log::error!("트랜잭션 중단 실패: {}", abort_err);
                }
                Err(e)
            }
        }
    }

    async fn create_in_transaction(
        &self,
        book_id: &ObjectId,
        review: Review,
        session: &mut mongodb::ClientSession,
    ) -> Result<(Book, Review), AppError> {
        let book = self
            .book_repo
            .increment_review_count(book_id, session)
            .await?
            .ok_or_else(|| AppError::NotFound("도서를 찾을 수 없습니다".to_string()))?;

        let saved = self.review_repo.insert_in_session(review, session).await?;
        Ok((book, saved))
    }

    /// 리뷰 부분 수정
    ///
    /// 도서와 리뷰가 모두 삭제되지 않은 상태여야 하며, 리뷰는 경로의
    /// 도서에 속해야 합니다. 제공된 필드만 변경합니다. `reviewedBy`는
    /// 명시된 경우에만 덮어쓰며, 생략 시 기존 값이 유지됩니다.
    /// 카운터는 변하지 않습니다.
    ///
    /// 첨부되는 도서는 `bookCover`/`deletedAt`을 제외한 필드 한정
    /// projection입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 빈 패치
    /// * `AppError::NotFound` - 도서/리뷰가 없거나 이미 삭제됨, 또는
    ///   리뷰가 해당 도서의 것이 아님
    pub async fn update(
        &self,
        book_id: &str,
        review_id: &str,
        request: UpdateReviewRequest,
    ) -> Result<BookWithReviewData<ProjectedBookResponse, ReviewResponse>, AppError> {
        let book_id = parse_object_id(book_id, "bookId")?;
        let review_id = parse_object_id(review_id, "reviewId")?;

        if request.is_empty() {
            return Err(AppError::ValidationError(
                "수정할 필드를 하나 이상 제공해야 합니다".to_string(),
            ));
        }

        let book = self
            .book_repo
            .find_active_by_id(&book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("도서를 찾을 수 없습니다".to_string()))?;

        let existing = self
            .review_repo
            .find_active_by_id(&review_id)
            .await?
            .filter(|review| review.book_id == book_id)
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        let mut set_doc = Document::new();
        if let Some(text) = request.review {
            set_doc.insert("review", text.trim());
        }
        if let Some(rating) = request.rating {
            set_doc.insert("rating", rating);
        }
        if let Some(reviewed_by) = request.reviewed_by {
            set_doc.insert("reviewedBy", reviewed_by);
        }

        let updated = self
            .review_repo
            .update_active(&review_id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        log::info!("리뷰 수정 완료: {}", existing.id_string().unwrap_or_default());
        Ok(BookWithReviewData {
            book: ProjectedBookResponse::from(book),
            review_data: ReviewResponse::from(updated),
        })
    }

    /// 리뷰 소프트 삭제
    ///
    /// 리뷰 삭제 표시와 도서 카운터 감소를 한 트랜잭션으로 처리합니다.
    /// 이미 삭제된 리뷰는 404이며, 이 경우 카운터는 변하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 도서/리뷰가 없거나 이미 삭제됨, 또는
    ///   리뷰가 해당 도서의 것이 아님
    /// * `AppError::DatabaseError` - 트랜잭션 실패
    pub async fn soft_delete(&self, book_id: &str, review_id: &str) -> Result<(), AppError> {
        let book_id = parse_object_id(book_id, "bookId")?;
        let review_id = parse_object_id(review_id, "reviewId")?;

        if self.book_repo.find_active_by_id(&book_id).await?.is_none() {
            return Err(AppError::NotFound("도서를 찾을 수 없습니다".to_string()));
        }

        let belongs = self
            .review_repo
            .find_active_by_id(&review_id)
            .await?
            .map(|review| review.book_id == book_id)
            .unwrap_or(false);

        if !belongs {
            return Err(AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()));
        }

        let mut session = self
            .db
            .client()
            .start_session()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        session
            .start_transaction()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let result = self
            .delete_in_transaction(&book_id, &review_id, &mut session)
            .await;

        match result {
            Ok(()) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                log::info!("리뷰 삭제 완료: {}", review_id.to_hex());
                Ok(())
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    log::error!("트랜잭션 중단 실패: {}", abort_err);
                }
                Err(e)
            }
        }
    }

    async fn delete_in_transaction(
        &self,
        book_id: &ObjectId,
        review_id: &ObjectId,
        session: &mut mongodb::ClientSession,
    ) -> Result<(), AppError> {
        let marked = self
            .review_repo
            .soft_delete_in_session(review_id, session)
            .await?;

        // 확인과 삭제 사이에 동시 삭제된 경우
        if !marked {
            return Err(AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()));
        }

        self.book_repo
            .decrement_review_count(book_id, session)
            .await
    }
}
