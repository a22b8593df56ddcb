//! # 사용자 리포지토리
//!
//! `users` 컬렉션의 데이터 액세스를 담당합니다.
//! 전화번호와 이메일의 유일성 조회, 회원가입 저장을 제공합니다.
//! 사용자는 현재 범위에서 수정/삭제되지 않습니다.

use std::sync::Arc;

use mongodb::{
    IndexModel,
    bson::doc,
    options::IndexOptions,
};

use crate::db::Database;
use crate::domain::entities::User;
use crate::errors::AppError;

const COLLECTION: &str = "users";

/// 사용자 데이터 액세스 리포지토리
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection<T: Send + Sync>(&self) -> mongodb::Collection<T> {
        self.db.get_database().collection(COLLECTION)
    }

    /// 이메일 주소로 사용자 조회
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 전화번호로 사용자 조회
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "phone": phone })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 저장
    ///
    /// 유일성 검사는 서비스 계층에서 저장 전에 수행됩니다.
    pub async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// 사용자 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("phone_unique".to_string())
                    .build(),
            )
            .build();

        self.collection::<User>()
            .create_indexes([email_index, phone_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
