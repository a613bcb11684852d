use crate::catalog::*;
use crate::records::{Album, Artist, Catalog, Track, TrackSource, UnitPrice};
use crate::{LoaderError, Result};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Track generator.
pub trait Generator {
    /// Generate a track with the given identifier.
    fn generate(&mut self, track_id: i32) -> Track;

    /// Get number of tracks generated.
    fn get_generated(&self) -> u32;
}

/// Generate the seed dataset.
///
/// Albums draw their artist first, then tracks draw album, composer, milliseconds, bytes,
/// price and genre in that order, so a fixed seed always yields the same catalog.
pub fn generate_catalog(rng: &mut StdRng) -> Catalog {
    let artists: Vec<Artist> = ARTISTS
        .iter()
        .enumerate()
        .map(|(i, name)| Artist::new(i as i32 + 1, name))
        .collect();

    let n_artists = artists.len() as i32;
    let albums: Vec<Album> = ALBUMS
        .iter()
        .enumerate()
        .map(|(i, title)| Album::new(i as i32 + 1, title, rng.gen_range(1..=n_artists)))
        .collect();

    let n_albums = albums.len() as i32;
    let tracks: Vec<Track> = TRACKS
        .iter()
        .enumerate()
        .map(|(i, name)| random_track(rng, i as i32 + 1, name.to_string(), n_albums))
        .collect();

    info!(
        "Generated catalog: {} artists, {} albums, {} tracks",
        artists.len(),
        albums.len(),
        tracks.len()
    );

    Catalog {
        artists,
        albums,
        tracks,
    }
}

/// Track with seed-phase attributes: random album in `[1, albums]` and random composer,
/// milliseconds, bytes, price and genre.
fn random_track(rng: &mut StdRng, track_id: i32, name: String, albums: i32) -> Track {
    let album_id = rng.gen_range(1..=albums);
    let composer = COMPOSERS.choose(rng).map(|c| c.to_string());
    let milliseconds = rng.gen_range(MIN_MILLISECONDS..=MAX_MILLISECONDS);
    let bytes = rng.gen_range(MIN_BYTES..=MAX_BYTES);
    let unit_price = UnitPrice::from_decimal(rng.gen_range(MIN_PRICE..=MAX_PRICE));
    let genre_id = rng.gen_range(MIN_GENRE..=MAX_GENRE);

    Track {
        track_id,
        name,
        album_id,
        media_type_id: MEDIA_TYPE_ID,
        genre_id,
        composer,
        milliseconds,
        bytes,
        unit_price,
    }
}

/// Read (name, composer) pairs from a CSV file with `Name` and `Composer` headers.
pub fn load_track_sources(path: &str) -> Result<Vec<TrackSource>> {
    info!("Loading track names from {}", path);
    let mut rdr = csv::Reader::from_path(path)?;

    let mut sources = Vec::new();
    for result in rdr.deserialize() {
        let source: TrackSource = result?;
        sources.push(source);
    }

    if sources.is_empty() {
        return Err(LoaderError::EmptyTrackFile(path.to_string()));
    }

    info!("Loaded {} track names", sources.len());
    Ok(sources)
}

/// Generator for the track inserter, sampling names and composers from the lookup file.
pub struct SampledTrackGenerator {
    /// Random number generator.
    rng: StdRng,

    /// Lookup table of (name, composer) pairs; never empty.
    sources: Vec<TrackSource>,

    /// Number of tracks generated.
    generated: u32,
}

impl SampledTrackGenerator {
    /// Create new `SampledTrackGenerator`.
    pub fn new(sources: Vec<TrackSource>, rng: StdRng) -> Result<SampledTrackGenerator> {
        if sources.is_empty() {
            return Err(LoaderError::EmptyTrackFile("<memory>".to_string()));
        }

        Ok(SampledTrackGenerator {
            rng,
            sources,
            generated: 0,
        })
    }
}

impl Generator for SampledTrackGenerator {
    fn generate(&mut self, track_id: i32) -> Track {
        self.generated += 1;

        let index = self.rng.gen_range(0..self.sources.len());
        let source = &self.sources[index];
        let genre_id = self.rng.gen_range(INSERTER_GENRE.0..INSERTER_GENRE.1);
        let milliseconds = self
            .rng
            .gen_range(INSERTER_MILLISECONDS.0..INSERTER_MILLISECONDS.1);
        let bytes = self.rng.gen_range(INSERTER_BYTES.0..INSERTER_BYTES.1);

        let track = Track {
            track_id,
            name: source.name.clone(),
            album_id: INSERTER_ALBUM_ID,
            media_type_id: MEDIA_TYPE_ID,
            genre_id,
            composer: source.composer.clone(),
            milliseconds,
            bytes,
            unit_price: UnitPrice(INSERTER_PRICE_CENTS),
        };
        debug!("{}", track);
        track
    }

    fn get_generated(&self) -> u32 {
        self.generated
    }
}

/// Generator for continuous generation: names are "{base} {id} ({version})".
pub struct VersionedTrackGenerator {
    /// Random number generator.
    rng: StdRng,

    /// Number of albums available to reference.
    albums: i32,

    /// Number of tracks generated.
    generated: u32,
}

impl VersionedTrackGenerator {
    /// Create new `VersionedTrackGenerator` referencing albums `1..=albums`.
    pub fn new(albums: i32, rng: StdRng) -> Result<VersionedTrackGenerator> {
        if albums < 1 {
            return Err(LoaderError::InvalidSetting(format!(
                "album count must be positive, got {}",
                albums
            )));
        }

        Ok(VersionedTrackGenerator {
            rng,
            albums,
            generated: 0,
        })
    }
}

impl Generator for VersionedTrackGenerator {
    fn generate(&mut self, track_id: i32) -> Track {
        self.generated += 1;

        let base = BASE_NAMES.choose(&mut self.rng).unwrap_or(&BASE_NAMES[0]);
        let version = VERSIONS.choose(&mut self.rng).unwrap_or(&VERSIONS[0]);
        let name = format!("{} {} ({})", base, track_id, version);

        let track = random_track(&mut self.rng, track_id, name, self.albums);
        debug!("{}", track);
        track
    }

    fn get_generated(&self) -> u32 {
        self.generated
    }
}
