use crate::{
    Db, Error,
    types::{AssetId, DateTime, WalletRow},
};
use mgx_core::{models::WalletRecord, ports::LedgerRepository};

impl LedgerRepository for Db {
    async fn credit(&self, asset_id: AssetId, amount: f64, as_of: DateTime) -> Result<(), Error> {
        let result = sqlx::query(
            "update wallet set balance = balance + $1, updated_at = $2 where asset_id = $3",
        )
        .bind(amount)
        .bind(as_of)
        .bind(asset_id)
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::MissingWallet(asset_id));
        }
        Ok(())
    }

    async fn debit(&self, asset_id: AssetId, amount: f64, as_of: DateTime) -> Result<(), Error> {
        // No balance floor: wallets may go negative by design.
        let result = sqlx::query(
            "update wallet set balance = balance - $1, updated_at = $2 where asset_id = $3",
        )
        .bind(amount)
        .bind(as_of)
        .bind(asset_id)
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::MissingWallet(asset_id));
        }
        Ok(())
    }

    async fn get_wallet(
        &self,
        asset_id: AssetId,
    ) -> Result<Option<WalletRecord<AssetId, DateTime>>, Error> {
        let row: Option<WalletRow> =
            sqlx::query_as("select asset_id, balance, updated_at from wallet where asset_id = $1")
                .bind(asset_id)
                .fetch_optional(&self.reader)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list_wallets(&self) -> Result<Vec<WalletRecord<AssetId, DateTime>>, Error> {
        let rows: Vec<WalletRow> =
            sqlx::query_as("select asset_id, balance, updated_at from wallet order by asset_id")
                .fetch_all(&self.reader)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
