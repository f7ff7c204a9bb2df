mod asset;
mod book;
mod config;
mod flexible;
mod forecast;
mod offer;
mod reading;
mod summary;
mod trade;
mod wallet;

pub use asset::{AssetKind, AssetRecord, UnknownAssetKind};
pub use book::{BookEntry, OfferBook, Trade};
pub use config::MarketConfig;
pub use flexible::{FlexibleLoadRecord, LoadShiftRecommendation};
pub use forecast::{Confidence, ForecastRecord, ForecastSummary, SurplusWindow, UnknownConfidence};
pub use offer::{OfferRecord, OfferSide, UnknownOfferSide};
pub use reading::ReadingRecord;
pub use summary::{DayStats, MarketSummary};
pub use trade::TradeRecord;
pub use wallet::WalletRecord;
