use super::{OfferRecord, OfferSide};

/// One offer as seen by the clearing engine.
///
/// A `BookEntry` is the mutable, checked-out form of an [`OfferRecord`]:
/// the matching pass owns the book exclusively for the duration of a cycle
/// and the repository commits the mutated entries back in one transaction,
/// so partially-cleared state is never visible to other readers.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry<OfferId, AssetId, DateTime> {
    /// The offer's identifier, used to commit the entry back to storage
    pub id: OfferId,
    /// The owning asset
    pub asset_id: AssetId,
    /// Buy or sell
    pub side: OfferSide,
    /// Remaining quantity, decremented as fills occur
    pub remaining_kwh: f64,
    /// Posted price
    pub price_per_kwh: f64,
    /// Creation time; the tie-break of price-time priority
    pub created_at: DateTime,
    /// Cleared entries are flagged inactive rather than removed
    pub is_active: bool,
}

impl<O, A, D> From<OfferRecord<O, A, D>> for BookEntry<O, A, D> {
    fn from(offer: OfferRecord<O, A, D>) -> Self {
        Self {
            id: offer.id,
            asset_id: offer.asset_id,
            side: offer.side,
            remaining_kwh: offer.quantity_kwh,
            price_per_kwh: offer.price_per_kwh,
            created_at: offer.created_at,
            is_active: offer.is_active,
        }
    }
}

/// The set of offers a matching pass operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferBook<OfferId, AssetId, DateTime> {
    /// The checked-out entries, in storage order
    pub entries: Vec<BookEntry<OfferId, AssetId, DateTime>>,
}

impl<O, A, D> OfferBook<O, A, D> {
    /// Build a book from checked-out entries.
    pub fn new(entries: Vec<BookEntry<O, A, D>>) -> Self {
        Self { entries }
    }
}

impl<O, A, D> FromIterator<BookEntry<O, A, D>> for OfferBook<O, A, D> {
    fn from_iter<I: IntoIterator<Item = BookEntry<O, A, D>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A fill produced by the clearing engine, before it is assigned an
/// identifier and timestamp by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade<AssetId> {
    /// The delivering asset (the grid asset for external fills)
    pub seller_asset_id: AssetId,
    /// The receiving asset
    pub buyer_asset_id: AssetId,
    /// Quantity filled, in kWh; always positive
    pub traded_kwh: f64,
    /// The seller's posted price (or the grid fallback price)
    pub price_per_kwh: f64,
    /// Whether this fill settled against the grid fallback
    pub is_external: bool,
}

impl<A> Trade<A> {
    /// Total credits transferred by this fill.
    pub fn total_credits(&self) -> f64 {
        self.traded_kwh * self.price_per_kwh
    }
}
