//! Static catalogue vocabulary: the slugs the model is allowed to use and
//! their RAWG numeric identifiers.
//!
//! Platform, parent-platform, and store filters are numeric on the RAWG
//! side, so those tables map slug to id. Developer, publisher, genre, and
//! tag filters accept slugs directly, so those are plain allow-lists.
//! All tables are process-wide constants, safe for unsynchronized reads.

/// Specific platform slug to RAWG platform id.
pub static PLATFORM_SLUG_TO_ID: &[(&str, i64)] = &[
    ("android", 21),
    ("game-boy-advance", 24),
    ("gamecube", 105),
    ("ios", 3),
    ("linux", 6),
    ("macos", 5),
    ("nes", 49),
    ("nintendo-3ds", 8),
    ("nintendo-64", 83),
    ("nintendo-ds", 9),
    ("nintendo-switch", 7),
    ("pc", 4),
    ("playstation1", 27),
    ("playstation2", 15),
    ("playstation3", 16),
    ("playstation4", 18),
    ("playstation5", 187),
    ("ps-vita", 19),
    ("psp", 17),
    ("snes", 79),
    ("wii", 11),
    ("wii-u", 10),
    ("xbox-one", 1),
    ("xbox-series-x", 186),
    ("xbox360", 14),
];

/// Broad platform-family slug to RAWG parent platform id.
pub static PARENT_PLATFORM_SLUG_TO_ID: &[(&str, i64)] = &[
    ("3do", 12),
    ("android", 8),
    ("apple-macintosh", 5),
    ("atari", 9),
    ("commodore-amiga", 10),
    ("ios", 4),
    ("linux", 6),
    ("neo-geo", 13),
    ("nintendo", 7),
    ("pc", 1),
    ("playstation", 2),
    ("sega", 11),
    ("web", 14),
    ("xbox", 3),
];

/// Storefront slug to RAWG store id.
pub static STORE_SLUG_TO_ID: &[(&str, i64)] = &[
    ("apple-appstore", 4),
    ("epic-games", 11),
    ("gog", 5),
    ("google-play", 8),
    ("itch", 9),
    ("nintendo", 6),
    ("playstation-store", 3),
    ("steam", 1),
    ("xbox-360-store", 7),
    ("xbox-store", 2),
];

/// Developer slugs RAWG accepts in the `developers` filter.
pub static DEVELOPER_SLUGS: &[&str] = &[
    "bethesda-game-studios",
    "blizzard-entertainment",
    "bungie",
    "capcom",
    "cd-projekt-red",
    "fromsoftware",
    "id-software",
    "insomniac-games",
    "larian-studios",
    "naughty-dog",
    "nintendo",
    "rockstar-games",
    "square-enix",
    "supergiant-games",
    "ubisoft",
    "valve-software",
];

/// Publisher slugs RAWG accepts in the `publishers` filter.
pub static PUBLISHER_SLUGS: &[&str] = &[
    "activision",
    "annapurna-interactive",
    "bandai-namco-entertainment",
    "bethesda-softworks",
    "devolver-digital",
    "electronic-arts",
    "microsoft-studios",
    "nintendo",
    "sega",
    "sony-interactive-entertainment",
    "square-enix",
    "ubisoft-entertainment",
];

/// Genre slugs RAWG accepts in the `genres` filter.
pub static GENRE_SLUGS: &[&str] = &[
    "action",
    "adventure",
    "arcade",
    "board-games",
    "card",
    "casual",
    "educational",
    "family",
    "fighting",
    "indie",
    "massively-multiplayer",
    "platformer",
    "puzzle",
    "racing",
    "role-playing-games-rpg",
    "shooter",
    "simulation",
    "sports",
    "strategy",
];

/// Tag slugs RAWG accepts in the `tags` filter.
pub static TAG_SLUGS: &[&str] = &[
    "anime",
    "atmospheric",
    "co-op",
    "difficult",
    "fantasy",
    "fast-paced",
    "fps",
    "funny",
    "horror",
    "multiplayer",
    "online-co-op",
    "open-world",
    "pixel-graphics",
    "relaxing",
    "retro",
    "roguelike",
    "sandbox",
    "sci-fi",
    "singleplayer",
    "story-rich",
    "survival",
    "third-person",
    "turn-based",
];

/// Legal `ordering` keys. A `-` prefix sorts descending.
pub static ORDERINGS: &[&str] = &[
    "added",
    "created",
    "metacritic",
    "name",
    "rating",
    "released",
    "updated",
    "-added",
    "-created",
    "-metacritic",
    "-name",
    "-rating",
    "-released",
    "-updated",
];

/// Translate platform slugs into RAWG platform ids, dropping unknown slugs.
pub fn platform_ids(slugs: &[String]) -> Vec<i64> {
    lookup_ids(PLATFORM_SLUG_TO_ID, slugs)
}

/// Translate parent-platform slugs into RAWG parent platform ids.
pub fn parent_platform_ids(slugs: &[String]) -> Vec<i64> {
    lookup_ids(PARENT_PLATFORM_SLUG_TO_ID, slugs)
}

/// Translate store slugs into RAWG store ids, dropping unknown slugs.
pub fn store_ids(slugs: &[String]) -> Vec<i64> {
    lookup_ids(STORE_SLUG_TO_ID, slugs)
}

/// Slugs advertised as the legal values of a slug-to-id table.
pub fn slugs_of(table: &'static [(&'static str, i64)]) -> Vec<&'static str> {
    table.iter().map(|(slug, _)| *slug).collect()
}

fn lookup_ids(table: &[(&str, i64)], slugs: &[String]) -> Vec<i64> {
    slugs
        .iter()
        .filter_map(|slug| {
            table
                .iter()
                .find(|(known, _)| known == slug)
                .map(|(_, id)| *id)
        })
        .collect()
}
