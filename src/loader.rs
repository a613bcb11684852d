//! Seed phase: wipe the catalog tables and load the fixed dataset in one transaction.

use crate::records::{Catalog, RowCounts};
use crate::settings::DatabaseSettings;
use crate::store::postgres::PgStore;
use crate::store::sql::Naming;
use crate::store::CatalogStore;
use crate::Result;

use tracing::{error, info};

/// Printed alongside connection failures.
pub const CONNECTION_HINT: &str = "Make sure PostgreSQL is running: docker-compose up -d postgres";

/// Open a connection, reporting failure instead of returning it.
pub async fn connect(settings: &DatabaseSettings, naming: Naming) -> Option<PgStore> {
    match PgStore::connect(settings, naming).await {
        Ok(store) => Some(store),
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            println!("Failed to connect to database: {}", e);
            println!("{}", CONNECTION_HINT);
            None
        }
    }
}

/// Replace the catalog tables with `catalog` and count the result.
pub async fn populate<S>(store: &mut S, catalog: &Catalog, reset_sequences: bool) -> Result<RowCounts>
where
    S: CatalogStore + ?Sized,
{
    let expected = catalog.counts();
    info!("Populating catalog tables: {}", expected);

    store.replace_catalog(catalog, reset_sequences).await?;
    let counts = store.counts().await?;

    info!("Loaded {}", counts);
    Ok(counts)
}

/// Run the seed phase, reporting any failure.
///
/// Returns `None` if the load failed; the store has rolled back and nothing was committed.
pub async fn auto_populate<S>(
    store: &mut S,
    catalog: &Catalog,
    reset_sequences: bool,
) -> Option<RowCounts>
where
    S: CatalogStore + ?Sized,
{
    println!("Auto-loading sample data...");

    match populate(store, catalog, reset_sequences).await {
        Ok(counts) => {
            println!();
            println!("Data loaded successfully!");
            println!("  Artists: {}", counts.artists);
            println!("  Albums: {}", counts.albums);
            println!("  Tracks: {}", counts.tracks);
            Some(counts)
        }
        Err(e) => {
            error!("Error loading data: {}", e);
            println!("Error loading data: {}", e);
            None
        }
    }
}
