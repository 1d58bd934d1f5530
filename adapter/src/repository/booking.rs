use crate::database::{model::booking::ClassAttendeeRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{event::ToggleBooking, BookingOutcome, BookingUser},
    id::{GymClassId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約のトグル操作を行う
    async fn toggle(&self, event: ToggleBooking) -> AppResult<BookingOutcome> {
        let mut tx = self.db.begin().await?;

        // (user_id, gym_class_id) をキーにしたアドバイザリロックを取得し、
        // 同一ペアへの同時トグルをトランザクション単位で直列化する。
        // 異なるペア同士はロックが衝突しないため並行に処理される
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text || '/' || $2::text))")
            .bind(event.user_id)
            .bind(event.gym_class_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_query_error)?;

        // 事前のチェックとして、指定のジムクラスが存在するかを調べる
        let class_row = sqlx::query("SELECT gym_class_id FROM gym_classes WHERE gym_class_id = $1")
            .bind(event.gym_class_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::from_query_error)?;

        if class_row.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "ジムクラス（{}）が見つかりませんでした。",
                event.gym_class_id
            )));
        }

        // まず削除を試みる。1 行消えたら予約解除として確定する
        let deleted = sqlx::query("DELETE FROM bookings WHERE user_id = $1 AND gym_class_id = $2")
            .bind(event.user_id)
            .bind(event.gym_class_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_query_error)?;

        if deleted.rows_affected() > 0 {
            tx.commit().await.map_err(AppError::TransactionError)?;
            return Ok(BookingOutcome::Unbooked);
        }

        // 行が無ければ予約を作成する。
        // bookings の複合主キー (user_id, gym_class_id) が二重予約を防ぐ
        // 最後の砦であり、後着の INSERT は ON CONFLICT で no-op となる。
        // no-op でも予約済みという到達状態は同じなので Booked を返す
        sqlx::query(
            r#"
            INSERT INTO bookings (user_id, gym_class_id, booked_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, gym_class_id) DO NOTHING
            "#,
        )
        .bind(event.user_id)
        .bind(event.gym_class_id)
        .bind(event.booked_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_query_error)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(BookingOutcome::Booked)
    }

    async fn is_booked(&self, user_id: UserId, gym_class_id: GymClassId) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE user_id = $1 AND gym_class_id = $2)",
        )
        .bind(user_id)
        .bind(gym_class_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)
    }

    async fn find_users_by_class_id(
        &self,
        gym_class_id: GymClassId,
    ) -> AppResult<Vec<BookingUser>> {
        sqlx::query_as::<_, ClassAttendeeRow>(
            r#"
            SELECT b.gym_class_id, u.user_id, u.user_name
            FROM bookings AS b
            INNER JOIN users AS u ON u.user_id = b.user_id
            WHERE b.gym_class_id = $1
            ORDER BY b.booked_at ASC
            "#,
        )
        .bind(gym_class_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(BookingUser::from).collect())
        .map_err(AppError::from_query_error)
    }
}
