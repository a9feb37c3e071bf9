// this_file: fontscan/src/charset.rs
//
// Unicode coverage and spacing classification

use crate::{
    face::{BdfProperty, FontFace},
    Result,
};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

const LEAF_WORDS: usize = 8;

/// Set of Unicode code points, stored as 256-entry bitmap pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    leaves: BTreeMap<u32, [u32; LEAF_WORDS]>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, codepoint: u32) {
        let leaf = self.leaves.entry(codepoint >> 8).or_insert([0; LEAF_WORDS]);
        let low = codepoint & 0xFF;
        leaf[(low >> 5) as usize] |= 1 << (low & 31);
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        let low = codepoint & 0xFF;
        self.leaves
            .get(&(codepoint >> 8))
            .is_some_and(|leaf| leaf[(low >> 5) as usize] & (1 << (low & 31)) != 0)
    }

    pub fn len(&self) -> usize {
        self.leaves
            .values()
            .flat_map(|leaf| leaf.iter())
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves
            .values()
            .all(|leaf| leaf.iter().all(|word| *word == 0))
    }

    /// Code points in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.leaves.iter().flat_map(|(page, leaf)| {
            leaf.iter().enumerate().flat_map(move |(i, word)| {
                (0..32)
                    .filter(move |bit| *word & (1u32 << bit) != 0)
                    .map(move |bit| (*page << 8) | ((i as u32) << 5) | bit)
            })
        })
    }

    /// Maximal runs of consecutive code points, as inclusive pairs
    pub fn ranges(&self) -> Vec<(u32, u32)> {
        let mut ranges: Vec<(u32, u32)> = Vec::new();
        for codepoint in self.iter() {
            match ranges.last_mut() {
                Some((_, end)) if *end + 1 == codepoint => *end = codepoint,
                _ => ranges.push((codepoint, codepoint)),
            }
        }
        ranges
    }

    /// Whether every code point in `ranges` is present
    pub fn covers_ranges(&self, ranges: &[(u32, u32)]) -> bool {
        ranges
            .iter()
            .all(|&(first, last)| (first..=last).all(|codepoint| self.contains(codepoint)))
    }

    /// Coverage of a face's selected character map.
    ///
    /// Control characters whose glyph has no contours are left out. With a
    /// symbol map, the U+F000 page is mirrored down to U+0000.
    pub fn from_face(face: &dyn FontFace) -> Result<Self> {
        let mut charset = CharSet::new();
        for (codepoint, glyph) in face.char_mappings() {
            // some CID fonts map ASCII controls to the space glyph
            if codepoint <= 0x1F && face.glyph_is_blank(glyph) {
                continue;
            }
            charset.insert(codepoint);
        }
        if face.has_symbol_charmap() {
            for codepoint in 0xF000..0xF100 {
                if charset.contains(codepoint) {
                    charset.insert(codepoint - 0xF000);
                }
            }
        }
        Ok(charset)
    }
}

impl FromIterator<u32> for CharSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut charset = CharSet::new();
        for codepoint in iter {
            charset.insert(codepoint);
        }
        charset
    }
}

impl Serialize for CharSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ranges().serialize(serializer)
    }
}

/// Horizontal spacing class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Proportional,
    Dual,
    Mono,
    Charcell,
}

impl Spacing {
    /// Numeric value on the font-database scale
    pub fn value(self) -> i32 {
        match self {
            Spacing::Proportional => 0,
            Spacing::Dual => 90,
            Spacing::Mono => 100,
            Spacing::Charcell => 110,
        }
    }

    /// Spacing declared by a BDF SPACING atom
    pub fn from_bdf(property: &BdfProperty) -> Option<Self> {
        match property.as_atom()? {
            "c" | "C" => Some(Spacing::Charcell),
            "m" | "M" => Some(Spacing::Mono),
            "p" | "P" => Some(Spacing::Proportional),
            _ => None,
        }
    }
}

/// Within about 3% of each other
fn approximately_equal(x: i64, y: i64) -> bool {
    (x - y).abs() * 33 <= x.abs().max(y.abs())
}

/// Classify spacing from the first three distinct non-zero advances met
/// while walking the character map.
pub fn spacing_from_advances(advances: impl IntoIterator<Item = i64>) -> Spacing {
    let mut distinct: Vec<i64> = Vec::with_capacity(3);
    for advance in advances {
        if distinct.len() == 3 {
            break;
        }
        if advance == 0 {
            continue;
        }
        if !distinct.iter().any(|seen| approximately_equal(advance, *seen)) {
            distinct.push(advance);
        }
    }
    match distinct.as_slice() {
        [] | [_] => Spacing::Mono,
        [a, b] if approximately_equal(a.min(b) * 2, *a.max(b)) => Spacing::Dual,
        _ => Spacing::Proportional,
    }
}

/// Spacing of a face: measured from advances, overridden by BDF SPACING
pub fn face_spacing(face: &dyn FontFace) -> Spacing {
    let measured = spacing_from_advances(
        face.char_mappings()
            .into_iter()
            .filter_map(|(_, glyph)| face.advance_width(glyph))
            .map(i64::from),
    );
    face.bdf_property("SPACING")
        .as_ref()
        .and_then(Spacing::from_bdf)
        .unwrap_or(measured)
}
