//! SQL text for the three catalog tables.
//!
//! Chinook exists in two flavours on Postgres: one with quoted CamelCase identifiers
//! (`"Track"."TrackId"`) and one created without quotes, which Postgres folds to lower case
//! (`track.trackid`). Values are always bound as parameters; only identifiers are rendered.

use strum_macros::EnumIter;

/// Catalog tables, in deletion order (dependents before parents).
#[derive(EnumIter, Debug, Clone, Copy, PartialEq)]
pub enum Table {
    Track,
    Album,
    Artist,
}

/// Identifier style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Naming {
    /// `"Track"`, `"TrackId"`, `"Track_TrackId_seq"`.
    Quoted,

    /// `Track`, `TrackId`, `track_trackid_seq`.
    Folded,
}

const TRACK_COLUMNS: [&str; 9] = [
    "TrackId",
    "Name",
    "AlbumId",
    "MediaTypeId",
    "GenreId",
    "Composer",
    "Milliseconds",
    "Bytes",
    "UnitPrice",
];

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Track => "Track",
            Table::Album => "Album",
            Table::Artist => "Artist",
        }
    }

    /// Primary key column.
    pub fn id_column(&self) -> &'static str {
        match self {
            Table::Track => "TrackId",
            Table::Album => "AlbumId",
            Table::Artist => "ArtistId",
        }
    }
}

impl Naming {
    pub fn from_quoted(quoted: bool) -> Naming {
        if quoted {
            Naming::Quoted
        } else {
            Naming::Folded
        }
    }

    /// Render a single identifier.
    pub fn ident(&self, name: &str) -> String {
        match self {
            Naming::Quoted => format!("\"{}\"", name),
            Naming::Folded => name.to_string(),
        }
    }

    fn columns(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|c| self.ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name of the sequence backing a table's primary key.
    pub fn sequence(&self, table: Table) -> String {
        match self {
            Naming::Quoted => format!("\"{}_{}_seq\"", table.name(), table.id_column()),
            Naming::Folded => format!(
                "{}_{}_seq",
                table.name().to_lowercase(),
                table.id_column().to_lowercase()
            ),
        }
    }

    pub fn delete_all(&self, table: Table) -> String {
        format!("DELETE FROM {}", self.ident(table.name()))
    }

    pub fn restart_sequence(&self, table: Table) -> String {
        format!("ALTER SEQUENCE {} RESTART WITH 1", self.sequence(table))
    }

    pub fn count(&self, table: Table) -> String {
        format!("SELECT COUNT(*) FROM {}", self.ident(table.name()))
    }

    /// Largest track id, 0 when the table is empty.
    pub fn max_track_id(&self) -> String {
        format!(
            "SELECT COALESCE(MAX({}), 0) FROM {}",
            self.ident(Table::Track.id_column()),
            self.ident(Table::Track.name())
        )
    }

    pub fn insert_artist(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ($1, $2)",
            self.ident(Table::Artist.name()),
            self.columns(&["ArtistId", "Name"])
        )
    }

    pub fn insert_album(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3)",
            self.ident(Table::Album.name()),
            self.columns(&["AlbumId", "Title", "ArtistId"])
        )
    }

    /// Track insert; the price is bound as a float and cast to the column's decimal type.
    pub fn insert_track(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CAST($9 AS NUMERIC(10,2)))",
            self.ident(Table::Track.name()),
            self.columns(&TRACK_COLUMNS)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn deletion_order_test() {
        let order: Vec<Table> = Table::iter().collect();
        assert_eq!(order, vec![Table::Track, Table::Album, Table::Artist]);
    }

    #[test]
    fn quoted_test() {
        let n = Naming::Quoted;
        assert_eq!(n.delete_all(Table::Track), "DELETE FROM \"Track\"");
        assert_eq!(
            n.restart_sequence(Table::Artist),
            "ALTER SEQUENCE \"Artist_ArtistId_seq\" RESTART WITH 1"
        );
        assert_eq!(
            n.max_track_id(),
            "SELECT COALESCE(MAX(\"TrackId\"), 0) FROM \"Track\""
        );
        assert_eq!(
            n.insert_artist(),
            "INSERT INTO \"Artist\" (\"ArtistId\", \"Name\") VALUES ($1, $2)"
        );
    }

    #[test]
    fn folded_test() {
        let n = Naming::from_quoted(false);
        assert_eq!(n.delete_all(Table::Album), "DELETE FROM Album");
        assert_eq!(
            n.restart_sequence(Table::Track),
            "ALTER SEQUENCE track_trackid_seq RESTART WITH 1"
        );
        assert_eq!(n.count(Table::Artist), "SELECT COUNT(*) FROM Artist");
        assert_eq!(
            n.insert_album(),
            "INSERT INTO Album (AlbumId, Title, ArtistId) VALUES ($1, $2, $3)"
        );
        assert_eq!(
            n.insert_track(),
            "INSERT INTO Track (TrackId, Name, AlbumId, MediaTypeId, GenreId, Composer, \
             Milliseconds, Bytes, UnitPrice) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, \
             CAST($9 AS NUMERIC(10,2)))"
        );
    }
}
