use crate::records::{Catalog, RowCounts, Track};
use crate::settings::DatabaseSettings;
use crate::store::sql::{Naming, Table};
use crate::store::CatalogStore;
use crate::Result;

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

/// `CatalogStore` over a single Postgres connection.
pub struct PgStore {
    conn: PgConnection,
    naming: Naming,
}

impl PgStore {
    /// Open a connection.
    pub async fn connect(settings: &DatabaseSettings, naming: Naming) -> Result<PgStore> {
        info!(
            "Connecting to postgres://{}@{}:{}/{}",
            settings.user, settings.host, settings.port, settings.name
        );

        let options = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .database(&settings.name)
            .username(&settings.user)
            .password(&settings.password);
        let conn = PgConnection::connect_with(&options).await?;

        Ok(PgStore { conn, naming })
    }

    /// Close the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

async fn insert_track(conn: &mut PgConnection, naming: Naming, track: &Track) -> Result<()> {
    sqlx::query(&naming.insert_track())
        .bind(track.track_id)
        .bind(track.name.as_str())
        .bind(track.album_id)
        .bind(track.media_type_id)
        .bind(track.genre_id)
        .bind(track.composer.as_deref())
        .bind(track.milliseconds)
        .bind(track.bytes)
        .bind(track.unit_price.as_f64())
        .execute(conn)
        .await?;
    Ok(())
}

/// Clear, optionally restart sequences, and insert the catalog.
async fn write_catalog(
    conn: &mut PgConnection,
    naming: Naming,
    catalog: &Catalog,
    reset_sequences: bool,
) -> Result<()> {
    info!("Clearing existing data");
    for table in Table::iter() {
        let result = sqlx::query(&naming.delete_all(table))
            .execute(&mut *conn)
            .await?;
        debug!("Deleted {} rows from {}", result.rows_affected(), table.name());
    }

    if reset_sequences {
        for table in Table::iter() {
            sqlx::query(&naming.restart_sequence(table))
                .execute(&mut *conn)
                .await?;
        }
    }

    info!("Loading artists");
    let sql = naming.insert_artist();
    for artist in &catalog.artists {
        sqlx::query(&sql)
            .bind(artist.artist_id)
            .bind(artist.name.as_str())
            .execute(&mut *conn)
            .await?;
    }

    info!("Loading albums");
    let sql = naming.insert_album();
    for album in &catalog.albums {
        sqlx::query(&sql)
            .bind(album.album_id)
            .bind(album.title.as_str())
            .bind(album.artist_id)
            .execute(&mut *conn)
            .await?;
    }

    info!("Loading tracks");
    for track in &catalog.tracks {
        insert_track(&mut *conn, naming, track).await?;
    }

    Ok(())
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn max_track_id(&mut self) -> Result<i32> {
        let max: i32 = sqlx::query_scalar(&self.naming.max_track_id())
            .fetch_one(&mut self.conn)
            .await?;
        Ok(max)
    }

    async fn insert_track(&mut self, track: &Track) -> Result<()> {
        insert_track(&mut self.conn, self.naming, track).await
    }

    async fn replace_catalog(&mut self, catalog: &Catalog, reset_sequences: bool) -> Result<()> {
        let naming = self.naming;
        let mut tx = self.conn.begin().await?;

        match write_catalog(&mut *tx, naming, catalog, reset_sequences).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(e) => {
                warn!("Rolling back catalog load: {}", e);
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    async fn counts(&mut self) -> Result<RowCounts> {
        let mut counts = RowCounts::default();
        for table in Table::iter() {
            let n: i64 = sqlx::query_scalar(&self.naming.count(table))
                .fetch_one(&mut self.conn)
                .await?;
            match table {
                Table::Artist => counts.artists = n,
                Table::Album => counts.albums = n,
                Table::Track => counts.tracks = n,
            }
        }
        Ok(counts)
    }
}
