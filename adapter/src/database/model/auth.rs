use kernel::model::id::UserId;

// ログイン時のパスワード検証に使う型
#[derive(sqlx::FromRow)]
pub struct UserItem {
    pub user_id: UserId,
    pub password_hash: String,
}
