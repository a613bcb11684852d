use chinook_loader::records::{Album, Artist, Catalog, RowCounts, Track};
use chinook_loader::settings::{self, Mode, Settings};
use chinook_loader::store::CatalogStore;
use chinook_loader::{LoaderError, Result};

use async_trait::async_trait;

/// Load the test configuration.
pub fn setup_settings(mode: Mode) -> Settings {
    let config = settings::init_config("./tests/Test-loader.toml", mode).unwrap();
    Settings::from_config(&config).unwrap()
}

/// In-memory `CatalogStore` with injectable failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,

    /// Fail the catalog load when this track id is about to be written.
    pub fail_on_track: Option<i32>,

    /// Fail single-track inserts once this many have succeeded.
    pub fail_after_inserts: Option<usize>,

    /// Successful single-track inserts.
    pub inserts: usize,

    /// Set when the catalog load restarted the sequences.
    pub sequences_reset: bool,
}

fn simulated(what: &str) -> LoaderError {
    LoaderError::Database(sqlx::Error::Protocol(format!("simulated failure: {}", what)))
}

impl MemoryStore {
    /// Store whose Track table already holds ids `1..=n`.
    pub fn with_tracks(n: i32) -> MemoryStore {
        let tracks = (1..=n)
            .map(|id| Track {
                track_id: id,
                name: format!("existing {}", id),
                album_id: 1,
                media_type_id: 1,
                genre_id: 1,
                composer: None,
                milliseconds: 200_000,
                bytes: 4_000_000,
                unit_price: chinook_loader::records::UnitPrice(99),
            })
            .collect();

        MemoryStore {
            tracks,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn max_track_id(&mut self) -> Result<i32> {
        Ok(self.tracks.iter().map(|t| t.track_id).max().unwrap_or(0))
    }

    async fn insert_track(&mut self, track: &Track) -> Result<()> {
        if let Some(n) = self.fail_after_inserts {
            if self.inserts >= n {
                return Err(simulated("insert"));
            }
        }
        if self.tracks.iter().any(|t| t.track_id == track.track_id) {
            return Err(simulated("duplicate key"));
        }

        self.tracks.push(track.clone());
        self.inserts += 1;
        Ok(())
    }

    async fn replace_catalog(&mut self, catalog: &Catalog, reset_sequences: bool) -> Result<()> {
        // Build the new contents aside and swap them in only on success.
        let mut tracks = Vec::new();
        for track in &catalog.tracks {
            if Some(track.track_id) == self.fail_on_track {
                return Err(simulated("catalog load"));
            }
            tracks.push(track.clone());
        }

        self.artists = catalog.artists.clone();
        self.albums = catalog.albums.clone();
        self.tracks = tracks;
        self.sequences_reset = reset_sequences;
        Ok(())
    }

    async fn counts(&mut self) -> Result<RowCounts> {
        Ok(RowCounts {
            artists: self.artists.len() as i64,
            albums: self.albums.len() as i64,
            tracks: self.tracks.len() as i64,
        })
    }
}
