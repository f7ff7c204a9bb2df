use crate::{
    Db, Error,
    types::{AssetId, FlexibleLoadRow},
};
use mgx_core::{
    models::{FlexibleLoadRecord, LoadShiftRecommendation},
    ports::{FlexibleLoadRepository, ForecastRepository as _},
};

impl FlexibleLoadRepository for Db {
    async fn upsert_profile(&self, profile: FlexibleLoadRecord<AssetId>) -> Result<(), Error> {
        sqlx::query(
            r#"
            insert into
                flexible_load (asset_id, min_kw, max_kw, is_shiftable,
                               preferred_start_hour, preferred_end_hour)
            values
                ($1, $2, $3, $4, $5, $6)
            on conflict (asset_id) do update set
                min_kw = excluded.min_kw,
                max_kw = excluded.max_kw,
                is_shiftable = excluded.is_shiftable,
                preferred_start_hour = excluded.preferred_start_hour,
                preferred_end_hour = excluded.preferred_end_hour
            "#,
        )
        .bind(profile.asset_id)
        .bind(profile.min_kw)
        .bind(profile.max_kw)
        .bind(profile.is_shiftable)
        .bind(profile.preferred_start_hour as i64)
        .bind(profile.preferred_end_hour as i64)
        .execute(&self.writer)
        .await?;

        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<FlexibleLoadRecord<AssetId>>, Error> {
        let rows: Vec<FlexibleLoadRow> = sqlx::query_as(
            r#"
            select
                asset_id, min_kw, max_kw, is_shiftable,
                preferred_start_hour, preferred_end_hour
            from
                flexible_load
            order by
                asset_id
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn load_shift_recommendations(&self) -> Result<Vec<LoadShiftRecommendation>, Error> {
        // The best surplus window is the shift target for every candidate.
        let Some(target) = self
            .surplus_windows()
            .await?
            .into_iter()
            .filter(|w| w.is_surplus())
            .max_by(|a, b| a.total_net_kw.total_cmp(&b.total_net_kw))
        else {
            return Ok(Vec::new());
        };

        let candidates: Vec<(String, FlexibleLoadRow)> = {
            let rows: Vec<FlexibleLoadNameRow> = sqlx::query_as(
                r#"
                select
                    a.name,
                    p.asset_id, p.min_kw, p.max_kw, p.is_shiftable,
                    p.preferred_start_hour, p.preferred_end_hour
                from
                    flexible_load p
                join
                    asset a on a.id = p.asset_id
                where
                    p.is_shiftable = 1
                order by
                    a.name
                "#,
            )
            .fetch_all(&self.reader)
            .await?;

            rows.into_iter().map(|row| (row.name, row.profile)).collect()
        };

        let target_start = target.from.hour_of_day();
        let target_end = target.thru.hour_of_day();

        Ok(candidates
            .into_iter()
            .filter(|(_, profile)| {
                // A load already drawing during the surplus hour needs no
                // shifting.
                profile.preferred_start_hour as u8 > target_start
                    || (profile.preferred_end_hour as u8) < target_start
            })
            .map(|(asset_name, profile)| LoadShiftRecommendation {
                asset_name,
                current_start_hour: profile.preferred_start_hour as u8,
                current_end_hour: profile.preferred_end_hour as u8,
                suggested_start_hour: target_start,
                suggested_end_hour: target_end,
                expected_savings_kwh: profile.max_kw.abs() * 0.5,
            })
            .collect())
    }
}

#[derive(sqlx::FromRow)]
struct FlexibleLoadNameRow {
    name: String,
    #[sqlx(flatten)]
    profile: FlexibleLoadRow,
}
