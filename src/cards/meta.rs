//! Game metadata tables.
//!
//! Rarity, foiling and art type codes are listed in order of increasing
//! rarity; that order is the rank used when sorting and collecting them.

/// Rarity codes and names, from most common to rarest.
pub const RARITIES: &[(&str, &str)] = &[
    ("T", "Token"),
    ("C", "Common"),
    ("R", "Rare"),
    ("S", "Super Rare"),
    ("M", "Majestic"),
    ("V", "Marvel"),
    ("L", "Legendary"),
    ("P", "Promotion"),
    ("F", "Fabled"),
];

/// Foiling codes and names, in order of foil rarity.
pub const FOILINGS: &[(&str, &str)] = &[
    ("S", "Standard"),
    ("R", "Rainbow Foil"),
    ("C", "Cold Foil"),
    ("P", "Promotion Foiling"),
    ("G", "Gold Cold Foil"),
];

/// Art type codes and names, in order of rarity.
pub const ART_TYPES: &[(&str, &str)] = &[
    ("S", "Standard"),
    ("AT", "Alternate Text"),
    ("DS", "Double Sided"),
    ("AA", "Alternate Art"),
    ("EA", "Extended Art"),
    ("FA", "Full Art"),
];

/// Set edition codes and names.
pub const EDITIONS: &[(&str, &str)] = &[
    ("A", "Alpha"),
    ("F", "First"),
    ("N", "None"),
    ("U", "Unlimited"),
];

/// Game format codes and names.
pub const GAME_FORMATS: &[(&str, &str)] = &[
    ("B", "Blitz"),
    ("C", "Commoner"),
    ("CC", "Classic Constructed"),
    ("D", "Draft"),
    ("UPF", "Ultimate Pit Fight"),
];

/// Pitch colors, indexed by `pitch - 1`.
pub const PITCH_COLORS: [&str; 3] = ["Red", "Yellow", "Blue"];

fn rank_in(table: &[(&str, &str)], code: &str) -> Option<usize> {
    table.iter().position(|(c, _)| *c == code)
}

/// Rank of a rarity code (0 = most common).
#[must_use]
pub fn rarity_rank(code: &str) -> Option<usize> {
    rank_in(RARITIES, code)
}

/// Full name of a rarity code.
#[must_use]
pub fn rarity_name(code: &str) -> Option<&'static str> {
    RARITIES.iter().find(|(c, _)| *c == code).map(|(_, n)| *n)
}

#[must_use]
pub fn foiling_rank(code: &str) -> Option<usize> {
    rank_in(FOILINGS, code)
}

#[must_use]
pub fn art_type_rank(code: &str) -> Option<usize> {
    rank_in(ART_TYPES, code)
}

/// Color expected for a concrete pitch value.
#[must_use]
pub fn pitch_color(pitch: i64) -> Option<&'static str> {
    match pitch {
        1..=3 => Some(PITCH_COLORS[(pitch - 1) as usize]),
        _ => None,
    }
}
