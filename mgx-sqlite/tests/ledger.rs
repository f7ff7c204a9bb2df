mod common;

use common::{add_asset, cycle_hour, open_db};
use mgx_core::{models::AssetKind, ports::LedgerRepository as _};
use mgx_sqlite::{Error, types::AssetId};

/// Wallets are born with the asset at the starting credit and move by
/// explicit credit/debit amounts.
#[tokio::test]
async fn credit_and_debit_move_the_balance() -> anyhow::Result<()> {
    let db = open_db().await?;
    let now = cycle_hour();

    let asset = add_asset(&db, "battery", AssetKind::Battery, 11.0).await?;

    db.credit(asset, 12.5, now).await?;
    db.debit(asset, 2.5, now.plus_hours(1)).await?;

    let wallet = db.get_wallet(asset).await?.unwrap();
    assert_eq!(wallet.balance, 110.0);
    assert_eq!(wallet.updated_at, now.plus_hours(1));

    let wallets = db.list_wallets().await?;
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].asset_id, asset);

    Ok(())
}

/// The ledger never creates wallets on demand: touching an unprovisioned
/// asset is a configuration fault.
#[tokio::test]
async fn unprovisioned_wallet_is_an_error() -> anyhow::Result<()> {
    let db = open_db().await?;
    let now = cycle_hour();

    let ghost = AssetId::random();
    let err = db.credit(ghost, 1.0, now).await.unwrap_err();
    assert!(matches!(err, Error::MissingWallet(asset) if asset == ghost));

    let err = db.debit(ghost, 1.0, now).await.unwrap_err();
    assert!(matches!(err, Error::MissingWallet(asset) if asset == ghost));

    assert!(db.get_wallet(ghost).await?.is_none());

    Ok(())
}
