//! Type definitions for the SQLite implementation.
//!
//! The public types are the strongly-typed identifiers and the [`DateTime`]
//! representation used throughout the crate. The private row structs map
//! database rows onto the domain records from `mgx-core`; the enum-ish
//! columns (asset kind, offer side, confidence) are stored as lowercase
//! text and parsed on the way out, so a conversion can fail with
//! [`Error::Corrupt`](crate::Error::Corrupt) if the database was edited
//! behind our back.

use crate::Error;
use mgx_core::models::{
    AssetRecord, BookEntry, FlexibleLoadRecord, ForecastRecord, OfferRecord, ReadingRecord,
    TradeRecord, WalletRecord,
};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{AssetId, OfferId, TradeId};

#[derive(sqlx::FromRow)]
pub(crate) struct AssetRow {
    pub id: AssetId,
    pub name: String,
    pub kind: String,
    pub max_capacity_kw: f64,
    pub is_active: bool,
}

impl AssetRow {
    pub fn into_record(self) -> Result<AssetRecord<AssetId>, Error> {
        Ok(AssetRecord {
            id: self.id,
            name: self.name,
            kind: self.kind.parse().map_err(|e| Error::Corrupt(format!("{e}")))?,
            max_capacity_kw: self.max_capacity_kw,
            is_active: self.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub id: OfferId,
    pub asset_id: AssetId,
    pub side: String,
    pub quantity_kwh: f64,
    pub price_per_kwh: f64,
    pub created_at: DateTime,
    pub is_active: bool,
}

impl OfferRow {
    pub fn into_record(self) -> Result<OfferRecord<OfferId, AssetId, DateTime>, Error> {
        Ok(OfferRecord {
            id: self.id,
            asset_id: self.asset_id,
            side: self.side.parse().map_err(|e| Error::Corrupt(format!("{e}")))?,
            quantity_kwh: self.quantity_kwh,
            price_per_kwh: self.price_per_kwh,
            created_at: self.created_at,
            is_active: self.is_active,
        })
    }

    pub fn into_entry(self) -> Result<BookEntry<OfferId, AssetId, DateTime>, Error> {
        self.into_record().map(Into::into)
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct TradeRow {
    pub id: TradeId,
    pub seller_asset_id: AssetId,
    pub buyer_asset_id: AssetId,
    pub traded_kwh: f64,
    pub price_per_kwh: f64,
    pub total_credits: f64,
    pub executed_at: DateTime,
    pub is_external: bool,
}

impl From<TradeRow> for TradeRecord<TradeId, AssetId, DateTime> {
    fn from(row: TradeRow) -> Self {
        Self {
            id: row.id,
            seller_asset_id: row.seller_asset_id,
            buyer_asset_id: row.buyer_asset_id,
            traded_kwh: row.traded_kwh,
            price_per_kwh: row.price_per_kwh,
            total_credits: row.total_credits,
            executed_at: row.executed_at,
            is_external: row.is_external,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ReadingRow {
    pub asset_id: AssetId,
    pub timestamp: DateTime,
    pub value_kw: f64,
}

impl From<ReadingRow> for ReadingRecord<AssetId, DateTime> {
    fn from(row: ReadingRow) -> Self {
        Self {
            asset_id: row.asset_id,
            timestamp: row.timestamp,
            value_kw: row.value_kw,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ForecastRow {
    pub asset_id: AssetId,
    pub hour: DateTime,
    pub expected_kw: f64,
    pub confidence: String,
}

impl ForecastRow {
    pub fn into_record(self) -> Result<ForecastRecord<AssetId, DateTime>, Error> {
        Ok(ForecastRecord {
            asset_id: self.asset_id,
            hour: self.hour,
            expected_kw: self.expected_kw,
            confidence: self
                .confidence
                .parse()
                .map_err(|e| Error::Corrupt(format!("{e}")))?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct WalletRow {
    pub asset_id: AssetId,
    pub balance: f64,
    pub updated_at: DateTime,
}

impl From<WalletRow> for WalletRecord<AssetId, DateTime> {
    fn from(row: WalletRow) -> Self {
        Self {
            asset_id: row.asset_id,
            balance: row.balance,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FlexibleLoadRow {
    pub asset_id: AssetId,
    pub min_kw: f64,
    pub max_kw: f64,
    pub is_shiftable: bool,
    pub preferred_start_hour: i64,
    pub preferred_end_hour: i64,
}

impl From<FlexibleLoadRow> for FlexibleLoadRecord<AssetId> {
    fn from(row: FlexibleLoadRow) -> Self {
        Self {
            asset_id: row.asset_id,
            min_kw: row.min_kw,
            max_kw: row.max_kw,
            is_shiftable: row.is_shiftable,
            preferred_start_hour: row.preferred_start_hour as u8,
            preferred_end_hour: row.preferred_end_hour as u8,
        }
    }
}
