use crate::{
    Db, Error,
    types::{AssetId, AssetRow, DateTime},
};
use mgx_core::{
    models::{AssetKind, AssetRecord},
    ports::AssetRepository,
};

impl AssetRepository for Db {
    /// The asset and its wallet are born in the same transaction: nothing
    /// downstream ever has to provision a wallet on demand.
    async fn create_asset(
        &self,
        asset_id: AssetId,
        name: String,
        kind: AssetKind,
        max_capacity_kw: f64,
        starting_credit: f64,
        as_of: DateTime,
    ) -> Result<AssetRecord<AssetId>, Error> {
        let mut tx = self.writer.begin().await?;

        sqlx::query(
            r#"
            insert into
                asset (id, name, kind, max_capacity_kw, is_active)
            values
                ($1, $2, $3, $4, 1)
            "#,
        )
        .bind(asset_id)
        .bind(&name)
        .bind(kind.as_str())
        .bind(max_capacity_kw)
        .execute(&mut *tx)
        .await?;

        sqlx::query("insert into wallet (asset_id, balance, updated_at) values ($1, $2, $3)")
            .bind(asset_id)
            .bind(starting_credit)
            .bind(as_of)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AssetRecord {
            id: asset_id,
            name,
            kind,
            max_capacity_kw,
            is_active: true,
        })
    }

    async fn get_asset(&self, asset_id: AssetId) -> Result<Option<AssetRecord<AssetId>>, Error> {
        let row: Option<AssetRow> = sqlx::query_as(
            "select id, name, kind, max_capacity_kw, is_active from asset where id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.reader)
        .await?;

        row.map(AssetRow::into_record).transpose()
    }

    async fn list_assets(&self) -> Result<Vec<AssetRecord<AssetId>>, Error> {
        let rows: Vec<AssetRow> = sqlx::query_as(
            "select id, name, kind, max_capacity_kw, is_active from asset order by name",
        )
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(AssetRow::into_record).collect()
    }

    async fn update_asset(
        &self,
        asset_id: AssetId,
        name: Option<String>,
        max_capacity_kw: Option<f64>,
        is_active: Option<bool>,
    ) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            update
                asset
            set
                name = coalesce($2, name),
                max_capacity_kw = coalesce($3, max_capacity_kw),
                is_active = coalesce($4, is_active)
            where
                id = $1
            "#,
        )
        .bind(asset_id)
        .bind(name)
        .bind(max_capacity_kw)
        .bind(is_active)
        .execute(&self.writer)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_asset(&self, asset_id: AssetId) -> Result<bool, Error> {
        // Readings, forecasts, offers, trades, the wallet, and any flexible
        // profile all cascade from the asset row.
        let result = sqlx::query("delete from asset where id = $1")
            .bind(asset_id)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
