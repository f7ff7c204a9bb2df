use crate::types::AssetId;
use thiserror::Error;

/// The unified error type for repository operations.
///
/// The configuration-fault variants (`MissingWallet`, `MissingGridAsset`)
/// abort a trading cycle before its transaction commits; callers should
/// treat them as provisioning bugs, not transient failures. Everything else wraps the underlying store and propagates
/// unchanged; retrying is the caller's decision.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the underlying SQLite operations
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Error while applying embedded migrations
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A trade leg referenced an asset that has no wallet
    #[error("no wallet provisioned for asset {0}")]
    MissingWallet(AssetId),

    /// A matching pass ran without a grid asset to fall back on
    #[error("no grid asset is registered")]
    MissingGridAsset,

    /// A stored value could not be mapped back into its domain type
    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}
