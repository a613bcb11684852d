use crate::records::{Catalog, RowCounts, Track};
use crate::Result;

use async_trait::async_trait;

pub mod postgres;

pub mod sql;

/// Storage for the three catalog tables.
///
/// Every method blocks the caller until the database has answered; implementations hold a
/// single connection.
#[async_trait]
pub trait CatalogStore: Send {
    /// Largest track id, or 0 if the table is empty.
    async fn max_track_id(&mut self) -> Result<i32>;

    /// Insert a single track and commit it immediately.
    async fn insert_track(&mut self, track: &Track) -> Result<()>;

    /// Replace the contents of all three tables with `catalog` in one transaction.
    ///
    /// On error nothing is committed.
    async fn replace_catalog(&mut self, catalog: &Catalog, reset_sequences: bool) -> Result<()>;

    /// Row counts, each from an independent count query.
    async fn counts(&mut self) -> Result<RowCounts>;
}
