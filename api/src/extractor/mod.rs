use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use registry::AppRegistry;
use shared::error::AppError;

pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // Bearer トークンからログインユーザーを解決する。
    // トークンが不正・期限切れの場合、ストアには一切触れずに失敗する
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;

        let access_token = AccessToken(bearer.token().to_string());

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self { access_token, user })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use chrono::{DateTime, Utc};
    use kernel::{
        model::{
            auth::event::CreateToken,
            booking::{event::ToggleBooking, BookingOutcome, BookingUser},
            gym_class::{
                event::{CreateGymClass, DeleteGymClass, UpdateGymClass},
                GymClass, GymClassListOptions,
            },
            id::GymClassId,
        },
        repository::{
            auth::AuthRepository, booking::BookingRepository, gym_class::GymClassRepository,
            health::HealthCheckRepository, user::UserRepository,
        },
    };
    use shared::error::AppResult;

    use super::*;

    struct StubHealthCheckRepository;

    #[async_trait]
    impl HealthCheckRepository for StubHealthCheckRepository {
        async fn check_db(&self) -> bool {
            unimplemented!()
        }
    }

    struct StubGymClassRepository;

    #[async_trait]
    impl GymClassRepository for StubGymClassRepository {
        async fn create(&self, _event: CreateGymClass) -> AppResult<GymClassId> {
            unimplemented!()
        }
        async fn update(&self, _event: UpdateGymClass) -> AppResult<()> {
            unimplemented!()
        }
        async fn delete(&self, _event: DeleteGymClass) -> AppResult<()> {
            unimplemented!()
        }
        async fn find_all(&self, _options: GymClassListOptions) -> AppResult<Vec<GymClass>> {
            unimplemented!()
        }
        async fn find_booked_by_user_id(&self, _user_id: UserId) -> AppResult<Vec<GymClass>> {
            unimplemented!()
        }
        async fn find_history_by_user_id(
            &self,
            _user_id: UserId,
            _now: DateTime<Utc>,
        ) -> AppResult<Vec<GymClass>> {
            unimplemented!()
        }
        async fn find_by_id(&self, _gym_class_id: GymClassId) -> AppResult<Option<GymClass>> {
            unimplemented!()
        }
    }

    struct StubBookingRepository;

    #[async_trait]
    impl BookingRepository for StubBookingRepository {
        async fn toggle(&self, _event: ToggleBooking) -> AppResult<BookingOutcome> {
            unimplemented!()
        }
        async fn is_booked(
            &self,
            _user_id: UserId,
            _gym_class_id: GymClassId,
        ) -> AppResult<bool> {
            unimplemented!()
        }
        async fn find_users_by_class_id(
            &self,
            _gym_class_id: GymClassId,
        ) -> AppResult<Vec<BookingUser>> {
            unimplemented!()
        }
    }

    struct StubUserRepository {
        user_id: UserId,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
            if current_user_id != self.user_id {
                return Ok(None);
            }
            Ok(Some(User {
                user_id: self.user_id,
                user_name: "Taro Yamada".into(),
                email: "taro.yamada@example.com".into(),
                role: Role::User,
                registered_at: Utc::now(),
            }))
        }
    }

    // トークンストアに登録済みのユーザー ID だけを返すスタブ
    struct StubAuthRepository {
        user_id: Option<UserId>,
    }

    #[async_trait]
    impl AuthRepository for StubAuthRepository {
        async fn fetch_user_id_from_token(
            &self,
            _access_token: &AccessToken,
        ) -> AppResult<Option<UserId>> {
            Ok(self.user_id)
        }
        async fn verify_user(&self, _email: &str, _password: &str) -> AppResult<UserId> {
            unimplemented!()
        }
        async fn create_token(&self, _event: CreateToken) -> AppResult<AccessToken> {
            unimplemented!()
        }
        async fn delete_token(&self, _access_token: AccessToken) -> AppResult<()> {
            unimplemented!()
        }
    }

    fn registry(auth_user_id: Option<UserId>, current_user_id: UserId) -> AppRegistry {
        AppRegistry::from_repositories(
            Arc::new(StubHealthCheckRepository),
            Arc::new(StubGymClassRepository),
            Arc::new(StubBookingRepository),
            Arc::new(StubUserRepository {
                user_id: current_user_id,
            }),
            Arc::new(StubAuthRepository {
                user_id: auth_user_id,
            }),
        )
    }

    fn parts_with_bearer(token: &str) -> Parts {
        Request::builder()
            .uri("/api/v1/gym-classes")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    // Authorization ヘッダが欠けている・形式が違う場合は
    // リポジトリに触れる前に拒否される
    #[tokio::test]
    async fn missing_or_malformed_bearer_is_unauthorized() {
        let registry = registry(None, UserId::new());

        let mut parts = Request::builder()
            .uri("/api/v1/gym-classes")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let res = AuthorizedUser::from_request_parts(&mut parts, &registry).await;
        assert!(matches!(res, Err(AppError::UnauthorizedError)));

        let mut parts = Request::builder()
            .uri("/api/v1/gym-classes")
            .header("Authorization", "Basic dGFybzpwYXNzd2Q=")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let res = AuthorizedUser::from_request_parts(&mut parts, &registry).await;
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
    }

    #[tokio::test]
    async fn unknown_token_is_unauthenticated() {
        let registry = registry(None, UserId::new());

        let mut parts = parts_with_bearer("deadbeef");
        let res = AuthorizedUser::from_request_parts(&mut parts, &registry).await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));
    }

    #[tokio::test]
    async fn valid_token_resolves_current_user() {
        let user_id = UserId::new();
        let registry = registry(Some(user_id), user_id);

        let mut parts = parts_with_bearer("deadbeef");
        let user = AuthorizedUser::from_request_parts(&mut parts, &registry)
            .await
            .unwrap();
        assert_eq!(user.id(), user_id);
        assert!(!user.is_admin());
    }
}
