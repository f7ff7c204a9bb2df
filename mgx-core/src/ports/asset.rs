use crate::models::{AssetKind, AssetRecord};

/// Repository interface for the asset registry.
///
/// Assets and their wallets are provisioned together: the trading engine
/// never creates a wallet implicitly, so a missing wallet at settlement
/// time is a data-consistency fault rather than a lazy-initialization case.
pub trait AssetRepository: super::Repository {
    /// Register a new asset and its wallet in one atomic step.
    ///
    /// The wallet starts at `starting_credit`.
    fn create_asset(
        &self,
        asset_id: Self::AssetId,
        name: String,
        kind: AssetKind,
        max_capacity_kw: f64,
        starting_credit: f64,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<AssetRecord<Self::AssetId>, Self::Error>> + Send;

    /// Look up a single asset.
    fn get_asset(
        &self,
        asset_id: Self::AssetId,
    ) -> impl Future<Output = Result<Option<AssetRecord<Self::AssetId>>, Self::Error>> + Send;

    /// List every registered asset.
    fn list_assets(
        &self,
    ) -> impl Future<Output = Result<Vec<AssetRecord<Self::AssetId>>, Self::Error>> + Send;

    /// Apply administrative edits to an asset.
    ///
    /// `None` fields are left unchanged.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the asset was updated
    /// - Ok(false) if no such asset exists
    fn update_asset(
        &self,
        asset_id: Self::AssetId,
        name: Option<String>,
        max_capacity_kw: Option<f64>,
        is_active: Option<bool>,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Remove an asset and everything hanging off it.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the asset existed and was removed
    /// - Ok(false) if no such asset exists
    fn delete_asset(
        &self,
        asset_id: Self::AssetId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
