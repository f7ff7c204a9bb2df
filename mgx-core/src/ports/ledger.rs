use crate::models::WalletRecord;

/// Repository interface for the per-asset credit ledger.
///
/// Amounts are always non-negative; the direction is encoded in the choice
/// of method. A missing wallet is a fatal consistency error surfaced
/// through `Self::Error`; wallets are provisioned with their asset and
/// never created on demand. There is no insufficient-balance rule: wallets
/// may go negative.
pub trait LedgerRepository: super::Repository {
    /// Increase an asset's balance by `amount`.
    fn credit(
        &self,
        asset_id: Self::AssetId,
        amount: f64,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Decrease an asset's balance by `amount`.
    fn debit(
        &self,
        asset_id: Self::AssetId,
        amount: f64,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Look up a single wallet.
    fn get_wallet(
        &self,
        asset_id: Self::AssetId,
    ) -> impl Future<Output = Result<Option<WalletRecord<Self::AssetId, Self::DateTime>>, Self::Error>>
    + Send;

    /// List every wallet.
    fn list_wallets(
        &self,
    ) -> impl Future<Output = Result<Vec<WalletRecord<Self::AssetId, Self::DateTime>>, Self::Error>>
    + Send;
}
