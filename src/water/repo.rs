use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One glass/bottle logged. Immutable; corrections go through deletion.
#[derive(Debug, Clone, FromRow)]
pub struct WaterLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub volume_ml: i32,
    pub entry_date: Date,
    pub created_at: OffsetDateTime,
}

pub async fn insert(db: &PgPool, user_id: Uuid, ml: i32, date: Date) -> sqlx::Result<WaterLog> {
    let row = sqlx::query_as::<_, WaterLog>(
        r#"
        INSERT INTO water_logs (user_id, volume_ml, entry_date)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, volume_ml, entry_date, created_at
        "#,
    )
    .bind(user_id)
    .bind(ml)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Deletes the most-recently-created entry of the day, regardless of its
/// volume. Returns false when the day has no entries.
pub async fn delete_last(db: &PgPool, user_id: Uuid, date: Date) -> sqlx::Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM water_logs
        WHERE id = (
            SELECT id FROM water_logs
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
        )
        "#,
    )
    .bind(user_id)
    .bind(date)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

/// Total volume and entry count for a day. A "glass" is one entry, not a
/// fixed volume.
pub async fn day_totals(db: &PgPool, user_id: Uuid, date: Date) -> sqlx::Result<(i64, i64)> {
    let row = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT COALESCE(SUM(volume_ml), 0)::bigint, COUNT(*)
        FROM water_logs
        WHERE user_id = $1 AND entry_date = $2
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    first: Date,
    last: Date,
) -> sqlx::Result<Vec<(Date, i64)>> {
    let rows = sqlx::query_as::<_, (Date, i64)>(
        r#"
        SELECT entry_date, volume_ml::bigint
        FROM water_logs
        WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
        ORDER BY entry_date ASC
        "#,
    )
    .bind(user_id)
    .bind(first)
    .bind(last)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[sqlx::test]
    async fn remove_last_deletes_most_recent_entry(pool: PgPool) -> sqlx::Result<()> {
        let user = Uuid::new_v4();
        let day = date!(2026 - 08 - 20);

        insert(&pool, user, 250, day).await?;
        insert(&pool, user, 500, day).await?;
        insert(&pool, user, 100, day).await?;

        // The 100 ml entry was added last, so it goes, not the largest.
        assert!(delete_last(&pool, user, day).await?);
        let (total, count) = day_totals(&pool, user, day).await?;
        assert_eq!(total, 750);
        assert_eq!(count, 2);
        Ok(())
    }

    #[sqlx::test]
    async fn remove_last_on_empty_day_is_signalled(pool: PgPool) -> sqlx::Result<()> {
        let user = Uuid::new_v4();
        let day = date!(2026 - 08 - 20);

        insert(&pool, user, 250, day).await?;
        assert!(!delete_last(&pool, user, date!(2026 - 08 - 21)).await?);
        // The other day's entry is untouched.
        assert_eq!(day_totals(&pool, user, day).await?, (250, 1));
        Ok(())
    }

    #[sqlx::test]
    async fn day_totals_are_scoped_to_user_and_date(pool: PgPool) -> sqlx::Result<()> {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let day = date!(2026 - 08 - 20);

        insert(&pool, user, 300, day).await?;
        insert(&pool, other, 999, day).await?;
        insert(&pool, user, 200, date!(2026 - 08 - 19)).await?;

        assert_eq!(day_totals(&pool, user, day).await?, (300, 1));
        let range = list_in_range(&pool, user, date!(2026 - 08 - 19), day).await?;
        assert_eq!(range, vec![(date!(2026 - 08 - 19), 200), (day, 300)]);
        Ok(())
    }
}
