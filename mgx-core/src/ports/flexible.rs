use crate::models::{FlexibleLoadRecord, LoadShiftRecommendation};

/// Repository interface for flexible-load profiles and shift
/// recommendations.
pub trait FlexibleLoadRepository: super::Repository {
    /// Create or replace the profile for an asset.
    fn upsert_profile(
        &self,
        profile: FlexibleLoadRecord<Self::AssetId>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// List every profile.
    fn list_profiles(
        &self,
    ) -> impl Future<Output = Result<Vec<FlexibleLoadRecord<Self::AssetId>>, Self::Error>> + Send;

    /// Suggest moving shiftable loads into the best forecast surplus
    /// window, if one exists outside their preferred hours.
    fn load_shift_recommendations(
        &self,
    ) -> impl Future<Output = Result<Vec<LoadShiftRecommendation>, Self::Error>> + Send;
}
