//! # 리뷰 리포지토리
//!
//! `reviews` 컬렉션의 데이터 액세스를 담당합니다.
//! 리뷰 생성/소프트 삭제는 도서의 리뷰 카운터 증감과 같은
//! 트랜잭션 세션 안에서 실행됩니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    ClientSession, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};

use crate::db::Database;
use crate::domain::entities::Review;
use crate::errors::AppError;

const COLLECTION: &str = "reviews";

/// 리뷰 데이터 액세스 리포지토리
pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection<T: Send + Sync>(&self) -> mongodb::Collection<T> {
        self.db.get_database().collection(COLLECTION)
    }

    /// 새 리뷰 저장 (카운터 증가와 같은 세션에서)
    pub async fn insert_in_session(
        &self,
        mut review: Review,
        session: &mut ClientSession,
    ) -> Result<Review, AppError> {
        let result = self
            .collection::<Review>()
            .insert_one(&review)
            .session(&mut *session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    /// 삭제되지 않은 리뷰를 ID로 조회
    pub async fn find_active_by_id(&self, id: &ObjectId) -> Result<Option<Review>, AppError> {
        self.collection::<Review>()
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 특정 도서의 삭제되지 않은 리뷰 전체 조회
    pub async fn find_active_by_book(&self, book_id: &ObjectId) -> Result<Vec<Review>, AppError> {
        let cursor = self
            .collection::<Review>()
            .find(doc! { "bookId": book_id, "isDeleted": false })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 삭제되지 않은 리뷰에 부분 수정을 적용하고 수정된 문서를 반환
    ///
    /// 카운터는 수정에서 변하지 않으므로 세션이 필요 없습니다.
    pub async fn update_active(
        &self,
        id: &ObjectId,
        set_doc: Document,
    ) -> Result<Option<Review>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Review>()
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": set_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Active → Deleted 전이 (카운터 감소와 같은 세션에서)
    ///
    /// 이미 삭제된 리뷰면 `false`를 반환합니다.
    pub async fn soft_delete_in_session(
        &self,
        id: &ObjectId,
        session: &mut ClientSession,
    ) -> Result<bool, AppError> {
        let result = self
            .collection::<Review>()
            .update_one(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": { "isDeleted": true } },
            )
            .session(&mut *session)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    /// 리뷰 컬렉션 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let book_index = IndexModel::builder()
            .keys(doc! { "bookId": 1, "isDeleted": 1 })
            .options(
                IndexOptions::builder()
                    .name("book_active".to_string())
                    .build(),
            )
            .build();

        self.collection::<Review>()
            .create_indexes([book_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
