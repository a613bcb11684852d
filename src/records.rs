use serde::{Deserialize, Serialize};
use std::fmt;

/// Represent a record in the Artist table.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub artist_id: i32,
    pub name: String,
}

/// Represent a record in the Album table.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub album_id: i32,
    pub title: String,
    pub artist_id: i32,
}

/// Represent a record in the Track table.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: i32,
    pub name: String,
    pub album_id: i32,
    pub media_type_id: i32,
    pub genre_id: i32,
    pub composer: Option<String>,
    pub milliseconds: i32,
    pub bytes: i32,
    pub unit_price: UnitPrice,
}

/// Price held in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitPrice(pub i64);

/// (name, composer) pair read from the track lookup file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TrackSource {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Composer")]
    pub composer: Option<String>,
}

/// Full seed dataset, generated before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCounts {
    pub artists: i64,
    pub albums: i64,
    pub tracks: i64,
}

impl Artist {
    /// Create new `Artist` record.
    pub fn new(artist_id: i32, name: &str) -> Artist {
        Artist {
            artist_id,
            name: name.to_string(),
        }
    }
}

impl Album {
    /// Create new `Album` record.
    pub fn new(album_id: i32, title: &str, artist_id: i32) -> Album {
        Album {
            album_id,
            title: title.to_string(),
            artist_id,
        }
    }
}

impl UnitPrice {
    /// Round a decimal price to the nearest cent.
    pub fn from_decimal(price: f64) -> UnitPrice {
        UnitPrice((price * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Value bound to the `NUMERIC(10,2)` column.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Catalog {
    pub fn counts(&self) -> RowCounts {
        RowCounts {
            artists: self.artists.len() as i64,
            albums: self.albums.len() as i64,
            tracks: self.tracks.len() as i64,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[id={}, name={}, album={}, genre={}, composer={}, ms={}, bytes={}, price={}]",
            self.track_id,
            self.name,
            self.album_id,
            self.genre_id,
            self.composer.as_deref().unwrap_or("-"),
            self.milliseconds,
            self.bytes,
            self.unit_price
        )
    }
}

impl fmt::Display for RowCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "artists: {}, albums: {}, tracks: {}",
            self.artists, self.albums, self.tracks
        )
    }
}
