use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, user::User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT u.user_id, u.user_name, u.email, r.role_name, u.created_at
            FROM users AS u
            INNER JOIN roles AS r ON r.role_id = u.role_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;
    use uuid::Uuid;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn find_current_user_resolves_role(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user_id =
            UserId::from(Uuid::parse_str("9582f9de-0fd1-4892-b20c-70139a7eb95b").unwrap());
        let user = repo.find_current_user(user_id).await?;
        assert!(user.is_some());

        let user = user.unwrap();
        assert_eq!(user.user_name, "Taro Yamada");
        assert_eq!(user.email, "member1@example.com");
        assert_eq!(user.role, Role::User);

        let missing = repo.find_current_user(UserId::new()).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
