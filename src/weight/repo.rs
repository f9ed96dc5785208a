use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

/// Body weight measurement, at most one per (user, date).
#[derive(Debug, Clone, FromRow)]
pub struct WeightLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub entry_date: Date,
}

/// Logging twice on one date replaces the value; the row count for that
/// date never grows past one.
pub async fn upsert(db: &PgPool, user_id: Uuid, kg: f64, date: Date) -> sqlx::Result<WeightLog> {
    let row = sqlx::query_as::<_, WeightLog>(
        r#"
        INSERT INTO weight_logs (user_id, weight_kg, entry_date)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, entry_date) DO UPDATE SET weight_kg = EXCLUDED.weight_kg
        RETURNING id, user_id, weight_kg, entry_date
        "#,
    )
    .bind(user_id)
    .bind(kg)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// The most recent `limit` entries, returned oldest first for charting.
pub async fn history(db: &PgPool, user_id: Uuid, limit: i64) -> sqlx::Result<Vec<WeightLog>> {
    let rows = sqlx::query_as::<_, WeightLog>(
        r#"
        SELECT id, user_id, weight_kg, entry_date
        FROM (
            SELECT id, user_id, weight_kg, entry_date
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY entry_date DESC
            LIMIT $2
        ) recent
        ORDER BY entry_date ASC
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn latest(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<WeightLog>> {
    let row = sqlx::query_as::<_, WeightLog>(
        r#"
        SELECT id, user_id, weight_kg, entry_date
        FROM weight_logs
        WHERE user_id = $1
        ORDER BY entry_date DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[sqlx::test]
    async fn same_date_upsert_replaces_value(pool: PgPool) -> sqlx::Result<()> {
        let user = Uuid::new_v4();
        let day = date!(2026 - 08 - 20);

        upsert(&pool, user, 82.0, day).await?;
        upsert(&pool, user, 81.5, day).await?;

        let hist = history(&pool, user, 90).await?;
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].weight_kg, 81.5);
        assert_eq!(latest(&pool, user).await?.map(|w| w.weight_kg), Some(81.5));
        Ok(())
    }

    #[sqlx::test]
    async fn history_caps_to_most_recent_but_returns_ascending(pool: PgPool) -> sqlx::Result<()> {
        let user = Uuid::new_v4();
        upsert(&pool, user, 83.0, date!(2026 - 08 - 18)).await?;
        upsert(&pool, user, 82.5, date!(2026 - 08 - 19)).await?;
        upsert(&pool, user, 82.0, date!(2026 - 08 - 20)).await?;

        let hist = history(&pool, user, 2).await?;
        let dates: Vec<_> = hist.iter().map(|w| w.entry_date).collect();
        assert_eq!(dates, vec![date!(2026 - 08 - 19), date!(2026 - 08 - 20)]);
        Ok(())
    }

    #[sqlx::test]
    async fn latest_is_none_for_unknown_user(pool: PgPool) -> sqlx::Result<()> {
        assert!(latest(&pool, Uuid::new_v4()).await?.is_none());
        Ok(())
    }
}
