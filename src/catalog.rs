//! Fixed dataset written by the seed phase.

pub const ARTISTS: [&str; 12] = [
    "The Beatles",
    "Led Zeppelin",
    "Pink Floyd",
    "Queen",
    "The Rolling Stones",
    "AC/DC",
    "Metallica",
    "Nirvana",
    "Radiohead",
    "U2",
    "Coldplay",
    "Red Hot Chili Peppers",
];

pub const ALBUMS: [&str; 12] = [
    "Abbey Road",
    "Led Zeppelin IV",
    "The Dark Side of the Moon",
    "A Night at the Opera",
    "Sticky Fingers",
    "Back in Black",
    "Master of Puppets",
    "Nevermind",
    "OK Computer",
    "The Joshua Tree",
    "Parachutes",
    "Blood Sugar Sex Magik",
];

pub const TRACKS: [&str; 29] = [
    "Come Together",
    "Stairway to Heaven",
    "Money",
    "Bohemian Rhapsody",
    "Paint It Black",
    "Thunderstruck",
    "Enter Sandman",
    "Smells Like Teen Spirit",
    "Paranoid Android",
    "Where the Streets Have No Name",
    "Yellow",
    "Under the Bridge",
    "Imagine",
    "Hotel California",
    "Sweet Child O' Mine",
    "Billie Jean",
    "Like a Rolling Stone",
    "Hey Jude",
    "Purple Haze",
    "Wonderwall",
    "Creep",
    "Black",
    "Alive",
    "Jeremy",
    "One",
    "Master of Puppets",
    "Back in Black",
    "Highway to Hell",
    "We Will Rock You",
];

pub const COMPOSERS: [&str; 11] = [
    "Lennon-McCartney",
    "Jimmy Page",
    "Roger Waters",
    "Freddie Mercury",
    "Mick Jagger",
    "Angus Young",
    "James Hetfield",
    "Kurt Cobain",
    "Thom Yorke",
    "Bono",
    "Chris Martin",
];

/// Base phrases for continuously generated track names.
pub const BASE_NAMES: [&str; 5] = [
    "Rock Anthem",
    "Power Ballad",
    "Heavy Metal",
    "Pop Hit",
    "Classic Rock",
];

/// Version suffixes for continuously generated track names.
pub const VERSIONS: [&str; 10] = [
    "Acoustic Version",
    "Live Version",
    "Remix",
    "Extended Mix",
    "Radio Edit",
    "Unplugged",
    "Demo Version",
    "Alternate Take",
    "Remastered",
    "Director's Cut",
];

/// Media type assigned to every generated track.
pub const MEDIA_TYPE_ID: i32 = 1;

/// Album assigned to every track from the track inserter.
pub const INSERTER_ALBUM_ID: i32 = 1;

/// Price in cents of every track from the track inserter.
pub const INSERTER_PRICE_CENTS: i64 = 99;

// Seed and continuous generation ranges, inclusive.
pub const MIN_MILLISECONDS: i32 = 180_000;
pub const MAX_MILLISECONDS: i32 = 360_000;
pub const MIN_BYTES: i32 = 3_000_000;
pub const MAX_BYTES: i32 = 8_000_000;
pub const MIN_PRICE: f64 = 0.99;
pub const MAX_PRICE: f64 = 1.99;
pub const MIN_GENRE: i32 = 1;
pub const MAX_GENRE: i32 = 5;

// Track inserter ranges, upper bound exclusive.
pub const INSERTER_MILLISECONDS: (i32, i32) = (100_000, 300_000);
pub const INSERTER_BYTES: (i32, i32) = (100_000, 500_000);
pub const INSERTER_GENRE: (i32, i32) = (1, 5);
