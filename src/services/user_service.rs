//! # 사용자 관리 서비스 구현
//!
//! 회원가입과 로그인의 비즈니스 로직을 담당합니다.
//!
//! ## 보안 설계
//!
//! - **bcrypt 해싱**: 비밀번호는 평문으로 저장되지 않으며, 환경별
//!   cost(`PasswordConfig`)로 해시됩니다.
//! - **민감 정보 제거**: 응답 DTO 변환 시 비밀번호 해시를 제외합니다.
//! - **중복 방지**: 전화번호와 이메일은 각각 유일해야 하며, 중복 시
//!   400으로 응답합니다.

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::config::PasswordConfig;
use crate::domain::dto::users::{LoginData, LoginRequest, RegisterUserRequest, UserResponse};
use crate::domain::entities::User;
use crate::errors::AppError;
use crate::repositories::UserRepository;
use crate::services::TokenService;

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    user_repo: Arc<UserRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// 회원가입 처리
    ///
    /// 전화번호/이메일 중복을 확인한 후 비밀번호를 해시하여 저장합니다.
    /// 검증과 중복 확인이 모두 통과하기 전에는 어떤 쓰기도 일어나지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 전화번호 또는 이메일 중복
    /// * `AppError::DatabaseError` - 저장 실패
    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse, AppError> {
        let email = request.email.trim().to_lowercase();
        let phone = request.phone.trim().to_string();

        if self.user_repo.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 등록된 전화번호입니다".to_string(),
            ));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 등록된 이메일입니다".to_string(),
            ));
        }

        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 실패: {}", e)))?;

        let user = User::new(
            request.title,
            request.name.trim().to_string(),
            phone,
            email,
            password_hash,
            request.address.into(),
        );

        let saved = self.user_repo.insert(user).await?;
        log::info!("사용자 등록 완료: {}", saved.email);

        Ok(UserResponse::from(saved))
    }

    /// 로그인 처리
    ///
    /// 이메일로 사용자를 찾고 bcrypt로 비밀번호를 검증한 후
    /// JWT 액세스 토큰을 발급합니다. 존재하지 않는 이메일과 비밀번호
    /// 불일치는 같은 메시지로 응답합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 증명 불일치
    pub async fn login(&self, request: LoginRequest) -> Result<LoginData, AppError> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                log::warn!("로그인 실패 (미등록 이메일): {}", email);
                AppError::AuthenticationError("이메일 또는 비밀번호가 올바르지 않습니다".to_string())
            })?;

        let matches = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::AuthenticationError(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;

        let (token, claims) = self.token_service.generate_token(&user_id)?;
        log::info!("로그인 성공: {}", email);

        Ok(LoginData {
            token,
            user_id,
            exp: claims.exp,
            iat: claims.iat,
        })
    }
}
