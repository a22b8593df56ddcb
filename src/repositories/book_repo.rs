//! # 도서 리포지토리
//!
//! `books` 컬렉션의 데이터 액세스를 담당합니다.
//! 제목/ISBN 유일성 조회, 소프트 삭제 전이, 그리고 리뷰 카운터의
//! 세션 기반 증감 연산을 제공합니다.
//!
//! 유일성 검사 의미:
//! - 생성 시: 삭제된 도서를 포함한 전체 컬렉션 대상
//! - 수정 시: 삭제되지 않은 다른 도서만 대상 (자기 자신 제외)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    ClientSession, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};

use crate::db::Database;
use crate::domain::dto::books::BookSummary;
use crate::domain::entities::Book;
use crate::errors::AppError;

const COLLECTION: &str = "books";

/// 목록 조회에 사용하는 요약 projection
fn summary_projection() -> Document {
    doc! {
        "_id": 1,
        "title": 1,
        "excerpt": 1,
        "userId": 1,
        "category": 1,
        "releasedAt": 1,
        "reviews": 1,
    }
}

/// 도서 데이터 액세스 리포지토리
pub struct BookRepository {
    db: Arc<Database>,
}

impl BookRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection<T: Send + Sync>(&self) -> mongodb::Collection<T> {
        self.db.get_database().collection(COLLECTION)
    }

    /// 새 도서 저장
    pub async fn insert(&self, mut book: Book) -> Result<Book, AppError> {
        let result = self
            .collection::<Book>()
            .insert_one(&book)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        book.id = result.inserted_id.as_object_id();
        Ok(book)
    }

    /// 삭제되지 않은 도서를 ID로 조회
    pub async fn find_active_by_id(&self, id: &ObjectId) -> Result<Option<Book>, AppError> {
        self.collection::<Book>()
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 삭제 여부와 무관하게 도서를 ID로 조회 (삭제 경로에서 사용)
    pub async fn find_any_by_id(&self, id: &ObjectId) -> Result<Option<Book>, AppError> {
        self.collection::<Book>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 제목 중복 여부 확인
    ///
    /// `exclude_id`가 주어지면 해당 문서는 제외하고(수정 시 자기 자신),
    /// `active_only`가 true이면 삭제되지 않은 도서만 검사합니다.
    pub async fn title_exists(
        &self,
        title: &str,
        exclude_id: Option<&ObjectId>,
        active_only: bool,
    ) -> Result<bool, AppError> {
        let mut filter = doc! { "title": title };
        if active_only {
            filter.insert("isDeleted", false);
        }
        if let Some(id) = exclude_id {
            filter.insert("_id", doc! { "$ne": id });
        }

        let found = self
            .collection::<Book>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(found.is_some())
    }

    /// ISBN 중복 여부 확인 (`title_exists`와 동일한 제외 규칙)
    pub async fn isbn_exists(
        &self,
        isbn: &str,
        exclude_id: Option<&ObjectId>,
        active_only: bool,
    ) -> Result<bool, AppError> {
        let mut filter = doc! { "ISBN": isbn };
        if active_only {
            filter.insert("isDeleted", false);
        }
        if let Some(id) = exclude_id {
            filter.insert("_id", doc! { "$ne": id });
        }

        let found = self
            .collection::<Book>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(found.is_some())
    }

    /// 필터에 맞는 도서를 요약 필드로 조회 (제목 오름차순)
    ///
    /// 필터에는 호출자가 이미 `isDeleted: false`를 포함시킵니다.
    pub async fn list_summaries(&self, filter: Document) -> Result<Vec<BookSummary>, AppError> {
        let cursor = self
            .collection::<BookSummary>()
            .find(filter)
            .projection(summary_projection())
            .sort(doc! { "title": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 삭제되지 않은 도서에 부분 수정을 적용하고 수정된 문서를 반환
    pub async fn update_active(
        &self,
        id: &ObjectId,
        mut set_doc: Document,
    ) -> Result<Option<Book>, AppError> {
        set_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Book>()
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": set_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Active → Deleted 전이
    ///
    /// 필터가 `isDeleted: false`를 요구하므로 이미 삭제된 도서에는
    /// 아무 일도 일어나지 않습니다 (`None` 반환).
    pub async fn soft_delete(&self, id: &ObjectId) -> Result<Option<Book>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Book>()
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": {
                    "isDeleted": true,
                    "deletedAt": DateTime::now(),
                    "updated_at": DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 리뷰 카운터 +1 (트랜잭션 세션 안에서 호출)
    ///
    /// 수정된 도서를 반환합니다.
    pub async fn increment_review_count(
        &self,
        id: &ObjectId,
        session: &mut ClientSession,
    ) -> Result<Option<Book>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Book>()
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$inc": { "reviews": 1 } },
            )
            .with_options(options)
            .session(&mut *session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 리뷰 카운터 -1, 0 밑으로는 내려가지 않음 (트랜잭션 세션 안에서 호출)
    ///
    /// `reviews > 0` 필터로 원자적으로 바닥을 보장합니다.
    pub async fn decrement_review_count(
        &self,
        id: &ObjectId,
        session: &mut ClientSession,
    ) -> Result<(), AppError> {
        self.collection::<Book>()
            .update_one(
                doc! { "_id": id, "reviews": { "$gt": 0 } },
                doc! { "$inc": { "reviews": -1 } },
            )
            .session(&mut *session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 도서 컬렉션 인덱스 생성
    ///
    /// 제목/ISBN 조회 최적화용 일반 인덱스입니다. 유일성은 소프트 삭제와
    /// 얽힌 검사 규칙 때문에 저장소 인덱스가 아닌 서비스 계층이 강제합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder().name("title_asc".to_string()).build())
            .build();

        let isbn_index = IndexModel::builder()
            .keys(doc! { "ISBN": 1 })
            .options(IndexOptions::builder().name("isbn_asc".to_string()).build())
            .build();

        self.collection::<Book>()
            .create_indexes([title_index, isbn_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
