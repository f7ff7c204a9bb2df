/// The credit ledger entry for a single asset.
///
/// Wallets are provisioned together with their asset and mutated only by
/// settled trade legs. Every internal trade moves the same amount out of
/// the buyer wallet and into the seller wallet; an external (grid) trade
/// debits the buyer only, since the grid is not tracked as a balance-holding
/// participant. Balances are allowed to go negative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalletRecord<AssetId, DateTime> {
    /// The owning asset
    pub asset_id: AssetId,
    /// Current credit balance
    pub balance: f64,
    /// When the balance last changed
    pub updated_at: DateTime,
}
