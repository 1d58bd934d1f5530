use crate::database::{
    model::{booking::ClassAttendeeRow, gym_class::GymClassRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    booking::BookingUser,
    gym_class::{
        event::{CreateGymClass, DeleteGymClass, UpdateGymClass},
        GymClass, GymClassListOptions,
    },
    id::{GymClassId, UserId},
};
use kernel::repository::gym_class::GymClassRepository;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(new)]
pub struct GymClassRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl GymClassRepository for GymClassRepositoryImpl {
    async fn create(&self, event: CreateGymClass) -> AppResult<GymClassId> {
        let gym_class_id = GymClassId::new();
        let res = sqlx::query(
            r#"
            INSERT INTO gym_classes
            (gym_class_id, gym_class_name, started_at, duration_minutes, description)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(gym_class_id)
        .bind(&event.gym_class_name)
        .bind(event.started_at)
        .bind(event.duration_minutes)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No gym class record has been created".into(),
            ));
        }

        Ok(gym_class_id)
    }

    async fn update(&self, event: UpdateGymClass) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE gym_classes
            SET gym_class_name = $1,
                started_at = $2,
                duration_minutes = $3,
                description = $4
            WHERE gym_class_id = $5
            "#,
        )
        .bind(&event.gym_class_name)
        .bind(event.started_at)
        .bind(event.duration_minutes)
        .bind(&event.description)
        .bind(event.gym_class_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        // 読み取りから書き込みまでの間に削除されていた場合は NotFound として返す
        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ジムクラス（{}）が見つかりませんでした。",
                event.gym_class_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteGymClass) -> AppResult<()> {
        // bookings 側は ON DELETE CASCADE により一緒に削除される
        let res = sqlx::query("DELETE FROM gym_classes WHERE gym_class_id = $1")
            .bind(event.gym_class_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::from_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ジムクラス（{}）が見つかりませんでした。",
                event.gym_class_id
            )));
        }

        Ok(())
    }

    async fn find_all(&self, options: GymClassListOptions) -> AppResult<Vec<GymClass>> {
        // include_past が false のときは開始時刻が now より後のものだけを返す。
        // now は引数として受け取った値をそのまま使い、ここでは時計を読まない
        let rows: Vec<GymClassRow> = sqlx::query_as(
            r#"
            SELECT gym_class_id, gym_class_name, started_at, duration_minutes, description
            FROM gym_classes
            WHERE $1 OR started_at > $2
            ORDER BY started_at ASC
            "#,
        )
        .bind(options.include_past)
        .bind(options.now)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        self.enrich_with_attendees(rows).await
    }

    async fn find_booked_by_user_id(&self, user_id: UserId) -> AppResult<Vec<GymClass>> {
        // bookings の複合主キーにより同一ユーザーの行は
        // クラスごとに高々 1 行なので、JOIN で重複は生じない
        let rows: Vec<GymClassRow> = sqlx::query_as(
            r#"
            SELECT g.gym_class_id, g.gym_class_name, g.started_at, g.duration_minutes, g.description
            FROM gym_classes AS g
            INNER JOIN bookings AS b ON b.gym_class_id = g.gym_class_id
            WHERE b.user_id = $1
            ORDER BY g.started_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        self.enrich_with_attendees(rows).await
    }

    async fn find_history_by_user_id(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<GymClass>> {
        // find_booked_by_user_id の SQL に開始時刻で絞り込む条件を
        // 追加したものである。同じクエリ形に時刻述語を足しただけなので、
        // 予約中一覧とこの履歴は任意の now で互いに素になる
        let rows: Vec<GymClassRow> = sqlx::query_as(
            r#"
            SELECT g.gym_class_id, g.gym_class_name, g.started_at, g.duration_minutes, g.description
            FROM gym_classes AS g
            INNER JOIN bookings AS b ON b.gym_class_id = g.gym_class_id
            WHERE b.user_id = $1 AND g.started_at < $2
            ORDER BY g.started_at ASC
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        self.enrich_with_attendees(rows).await
    }

    async fn find_by_id(&self, gym_class_id: GymClassId) -> AppResult<Option<GymClass>> {
        let row: Option<GymClassRow> = sqlx::query_as(
            r#"
            SELECT gym_class_id, gym_class_name, started_at, duration_minutes, description
            FROM gym_classes
            WHERE gym_class_id = $1
            "#,
        )
        .bind(gym_class_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        self.enrich_with_attendees(vec![row])
            .await
            .map(|mut classes| classes.pop())
    }
}

impl GymClassRepositoryImpl {
    // 取得済みのジムクラス行に参加者一覧を付与する
    async fn enrich_with_attendees(&self, rows: Vec<GymClassRow>) -> AppResult<Vec<GymClass>> {
        let class_ids: Vec<Uuid> = rows.iter().map(|r| r.gym_class_id.raw()).collect();

        let attendee_rows: Vec<ClassAttendeeRow> = sqlx::query_as(
            r#"
            SELECT b.gym_class_id, u.user_id, u.user_name
            FROM bookings AS b
            INNER JOIN users AS u ON u.user_id = b.user_id
            WHERE b.gym_class_id = ANY($1)
            ORDER BY b.booked_at ASC
            "#,
        )
        .bind(&class_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_query_error)?;

        let mut attendees: HashMap<GymClassId, Vec<BookingUser>> = HashMap::new();
        for row in attendee_rows {
            attendees
                .entry(row.gym_class_id)
                .or_default()
                .push(BookingUser::from(row));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let list = attendees.remove(&row.gym_class_id).unwrap_or_default();
                row.into_gym_class(list)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::booking::BookingRepositoryImpl;
    use chrono::{TimeZone, Utc};
    use kernel::model::booking::{event::ToggleBooking, BookingOutcome};
    use kernel::repository::booking::BookingRepository;

    fn member1_id() -> UserId {
        UserId::from(Uuid::parse_str("9582f9de-0fd1-4892-b20c-70139a7eb95b").unwrap())
    }

    fn yoga_class_id() -> GymClassId {
        GymClassId::from(Uuid::parse_str("f9a70cb8-7ad6-40b4-9f25-a023a8801f6b").unwrap())
    }

    fn spin_class_id() -> GymClassId {
        GymClassId::from(Uuid::parse_str("055bb27d-cb64-4dbd-9c22-0f237b0569a0").unwrap())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[sqlx::test]
    async fn register_update_and_delete_gym_class(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = GymClassRepositoryImpl::new(ConnectionPool::new(pool));

        let gym_class_id = repo
            .create(CreateGymClass::new(
                "Test Class".into(),
                Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
                60,
                "Test Description".into(),
            ))
            .await?;

        let found = repo.find_by_id(gym_class_id).await?;
        assert!(found.is_some());

        let GymClass {
            gym_class_id: id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
            attendees,
        } = found.unwrap();
        assert_eq!(id, gym_class_id);
        assert_eq!(gym_class_name, "Test Class");
        assert_eq!(started_at, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(duration_minutes, 60);
        assert_eq!(description, "Test Description");
        assert!(attendees.is_empty());

        repo.update(UpdateGymClass::new(
            gym_class_id,
            "Renamed Class".into(),
            Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap(),
            45,
            "Updated".into(),
            UserId::new(),
        ))
        .await?;
        let updated = repo.find_by_id(gym_class_id).await?.unwrap();
        assert_eq!(updated.gym_class_name, "Renamed Class");
        assert_eq!(updated.duration_minutes, 45);

        repo.delete(DeleteGymClass::new(gym_class_id, UserId::new()))
            .await?;
        assert!(repo.find_by_id(gym_class_id).await?.is_none());

        // 既に消えているものへの更新・削除は NotFound になる
        let res = repo
            .delete(DeleteGymClass::new(gym_class_id, UserId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn find_all_filters_past_classes(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = GymClassRepositoryImpl::new(ConnectionPool::new(pool));

        // includePast = false では開始時刻が now より後のものだけが残る
        let upcoming = repo
            .find_all(GymClassListOptions::new(false, now()))
            .await?;
        assert_eq!(upcoming.len(), 2);
        assert!(upcoming.iter().all(|c| c.started_at > now()));

        // includePast = true では全件が返る。どちらも開始時刻の昇順
        let all = repo.find_all(GymClassListOptions::new(true, now())).await?;
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].started_at <= w[1].started_at));
        assert_eq!(all[0].gym_class_id, spin_class_id());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn booked_and_history_partition_by_now(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let gym_class_repo = GymClassRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let booking_repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));
        let user_id = member1_id();

        // 過去・未来それぞれ 1 件ずつ予約する
        for gym_class_id in [spin_class_id(), yoga_class_id()] {
            let outcome = booking_repo
                .toggle(ToggleBooking::new(gym_class_id, user_id, now()))
                .await?;
            assert_eq!(outcome, BookingOutcome::Booked);
        }

        let booked = gym_class_repo.find_booked_by_user_id(user_id).await?;
        let history = gym_class_repo
            .find_history_by_user_id(user_id, now())
            .await?;

        // 予約一覧は時刻で絞られず、昇順で両方が返る
        assert_eq!(booked.len(), 2);
        assert_eq!(booked[0].gym_class_id, spin_class_id());
        assert_eq!(booked[1].gym_class_id, yoga_class_id());

        // 履歴は開始時刻が now より前のものだけ
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].gym_class_id, spin_class_id());

        // 分割則: booked = history ∪ {started_at >= now} かつ両者は互いに素
        let history_ids: Vec<_> = history.iter().map(|c| c.gym_class_id).collect();
        let rest_ids: Vec<_> = booked
            .iter()
            .filter(|c| c.started_at >= now())
            .map(|c| c.gym_class_id)
            .collect();
        assert!(history_ids.iter().all(|id| !rest_ids.contains(id)));
        assert_eq!(history_ids.len() + rest_ids.len(), booked.len());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn delete_cascades_to_bookings(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let gym_class_repo = GymClassRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let booking_repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));
        let (user_id, gym_class_id) = (member1_id(), yoga_class_id());

        booking_repo
            .toggle(ToggleBooking::new(gym_class_id, user_id, now()))
            .await?;
        assert!(booking_repo.is_booked(user_id, gym_class_id).await?);

        gym_class_repo
            .delete(DeleteGymClass::new(gym_class_id, UserId::new()))
            .await?;

        // 予約の行も一緒に消え、古い予約状態が残らない
        assert!(!booking_repo.is_booked(user_id, gym_class_id).await?);
        assert!(gym_class_repo.find_by_id(gym_class_id).await?.is_none());
        assert!(gym_class_repo.find_booked_by_user_id(user_id).await?.is_empty());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn details_include_attendees(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let gym_class_repo = GymClassRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let booking_repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));
        let gym_class_id = yoga_class_id();

        let member2_id =
            UserId::from(Uuid::parse_str("1a0cbf0e-48d3-4f74-9888-d1dd0e1e82c4").unwrap());
        for user_id in [member1_id(), member2_id] {
            booking_repo
                .toggle(ToggleBooking::new(gym_class_id, user_id, now()))
                .await?;
        }

        let class = gym_class_repo.find_by_id(gym_class_id).await?.unwrap();
        assert_eq!(class.attendees.len(), 2);
        assert!(class
            .attendees
            .iter()
            .any(|a| a.user_name == "Hanako Sato"));

        Ok(())
    }
}
