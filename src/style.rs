// this_file: fontscan/src/style.rs
//
// Style-name classification into weight, width, slant and decorative axes,
// plus the numeric fallbacks used when style names say nothing.

use crate::{
    face::{FaceFlags, Os2Info},
    utils,
};
use serde::Serialize;

pub const WEIGHT_THIN: f64 = 0.0;
pub const WEIGHT_EXTRALIGHT: f64 = 40.0;
pub const WEIGHT_LIGHT: f64 = 50.0;
pub const WEIGHT_DEMILIGHT: f64 = 55.0;
pub const WEIGHT_BOOK: f64 = 75.0;
pub const WEIGHT_REGULAR: f64 = 80.0;
pub const WEIGHT_MEDIUM: f64 = 100.0;
pub const WEIGHT_DEMIBOLD: f64 = 180.0;
pub const WEIGHT_BOLD: f64 = 200.0;
pub const WEIGHT_EXTRABOLD: f64 = 205.0;
pub const WEIGHT_BLACK: f64 = 210.0;
pub const WEIGHT_EXTRABLACK: f64 = 215.0;

pub const WIDTH_ULTRACONDENSED: f64 = 50.0;
pub const WIDTH_EXTRACONDENSED: f64 = 63.0;
pub const WIDTH_CONDENSED: f64 = 75.0;
pub const WIDTH_SEMICONDENSED: f64 = 87.0;
pub const WIDTH_NORMAL: f64 = 100.0;
pub const WIDTH_SEMIEXPANDED: f64 = 113.0;
pub const WIDTH_EXPANDED: f64 = 125.0;
pub const WIDTH_EXTRAEXPANDED: f64 = 150.0;
pub const WIDTH_ULTRAEXPANDED: f64 = 200.0;

/// Slant classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slant {
    Roman,
    Italic,
    Oblique,
}

impl Slant {
    /// Numeric value on the font-database scale
    pub fn value(self) -> i32 {
        match self {
            Slant::Roman => 0,
            Slant::Italic => 100,
            Slant::Oblique => 110,
        }
    }
}

/// How a style keyword is looked for inside a longer string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Anywhere, ignoring blanks and case
    Text(&'static str),
    /// Only as a whole word
    Word(&'static str),
}

/// One entry of an ordered keyword table; the first matching entry wins
#[derive(Debug, Clone, Copy)]
pub struct StyleKeyword<T> {
    pub keyword: Keyword,
    pub value: T,
}

const fn text<T>(keyword: &'static str, value: T) -> StyleKeyword<T> {
    StyleKeyword {
        keyword: Keyword::Text(keyword),
        value,
    }
}

const fn word<T>(keyword: &'static str, value: T) -> StyleKeyword<T> {
    StyleKeyword {
        keyword: Keyword::Word(keyword),
        value,
    }
}

pub static WEIGHT_KEYWORDS: &[StyleKeyword<f64>] = &[
    text("thin", WEIGHT_THIN),
    text("extralight", WEIGHT_EXTRALIGHT),
    text("ultralight", WEIGHT_EXTRALIGHT),
    text("demilight", WEIGHT_DEMILIGHT),
    text("semilight", WEIGHT_DEMILIGHT),
    text("light", WEIGHT_LIGHT),
    text("book", WEIGHT_BOOK),
    text("regular", WEIGHT_REGULAR),
    text("normal", WEIGHT_REGULAR),
    text("medium", WEIGHT_MEDIUM),
    text("demibold", WEIGHT_DEMIBOLD),
    text("demi", WEIGHT_DEMIBOLD),
    text("semibold", WEIGHT_DEMIBOLD),
    text("extrabold", WEIGHT_EXTRABOLD),
    text("superbold", WEIGHT_EXTRABOLD),
    text("ultrabold", WEIGHT_EXTRABOLD),
    text("bold", WEIGHT_BOLD),
    text("ultrablack", WEIGHT_EXTRABLACK),
    text("superblack", WEIGHT_EXTRABLACK),
    text("extrablack", WEIGHT_EXTRABLACK),
    word("ultra", WEIGHT_EXTRABOLD),
    text("black", WEIGHT_BLACK),
    text("heavy", WEIGHT_BLACK),
];

// prefixed forms come before the bare "condensed" and "expanded"
pub static WIDTH_KEYWORDS: &[StyleKeyword<f64>] = &[
    text("ultracondensed", WIDTH_ULTRACONDENSED),
    text("extracondensed", WIDTH_EXTRACONDENSED),
    text("semicondensed", WIDTH_SEMICONDENSED),
    text("condensed", WIDTH_CONDENSED),
    text("normal", WIDTH_NORMAL),
    text("semiexpanded", WIDTH_SEMIEXPANDED),
    text("extraexpanded", WIDTH_EXTRAEXPANDED),
    text("ultraexpanded", WIDTH_ULTRAEXPANDED),
    text("expanded", WIDTH_EXPANDED),
    text("extended", WIDTH_EXPANDED),
];

pub static SLANT_KEYWORDS: &[StyleKeyword<Slant>] = &[
    text("italic", Slant::Italic),
    text("kursiv", Slant::Italic),
    text("oblique", Slant::Oblique),
];

pub static DECORATIVE_KEYWORDS: &[StyleKeyword<bool>] = &[
    text("shadow", true),
    text("caps", true),
    text("antiqua", true),
    text("romansc", true),
    text("embosed", true),
    text("dunhill", true),
];

/// Exact match, ignoring blanks and case. Word-only entries never match.
pub fn lookup_exact<T: Copy>(s: &str, table: &[StyleKeyword<T>]) -> Option<T> {
    table.iter().find_map(|entry| match entry.keyword {
        Keyword::Text(keyword) if utils::eq_ignore_blanks_and_case(s, keyword) => Some(entry.value),
        _ => None,
    })
}

/// Substring match, honouring word-only entries
pub fn lookup_contains<T: Copy>(s: &str, table: &[StyleKeyword<T>]) -> Option<T> {
    table.iter().find_map(|entry| {
        let found = match entry.keyword {
            Keyword::Text(keyword) => utils::contains_ignore_blanks_and_case(s, keyword),
            Keyword::Word(keyword) => utils::contains_word(s, keyword),
        };
        found.then_some(entry.value)
    })
}

fn lookup<T: Copy>(s: &str, table: &[StyleKeyword<T>]) -> Option<T> {
    lookup_exact(s, table).or_else(|| lookup_contains(s, table))
}

pub fn classify_weight(s: &str) -> Option<f64> {
    lookup(s, WEIGHT_KEYWORDS)
}

pub fn classify_width(s: &str) -> Option<f64> {
    lookup(s, WIDTH_KEYWORDS)
}

pub fn classify_slant(s: &str) -> Option<Slant> {
    lookup_contains(s, SLANT_KEYWORDS)
}

pub fn classify_decorative(s: &str) -> bool {
    lookup_contains(s, DECORATIVE_KEYWORDS).unwrap_or(false)
}

/// OpenType `usWeightClass` to font-database weight, piecewise linear
static OPENTYPE_WEIGHTS: &[(f64, f64)] = &[
    (0.0, WEIGHT_THIN),
    (100.0, WEIGHT_THIN),
    (200.0, WEIGHT_EXTRALIGHT),
    (300.0, WEIGHT_LIGHT),
    (350.0, WEIGHT_DEMILIGHT),
    (380.0, WEIGHT_BOOK),
    (400.0, WEIGHT_REGULAR),
    (500.0, WEIGHT_MEDIUM),
    (600.0, WEIGHT_DEMIBOLD),
    (700.0, WEIGHT_BOLD),
    (800.0, WEIGHT_EXTRABOLD),
    (900.0, WEIGHT_BLACK),
    (1000.0, WEIGHT_EXTRABLACK),
];

/// Map an OpenType weight (clamped to 1000) onto the font-database scale.
/// Negative weights have no mapping.
pub fn weight_from_opentype(ot_weight: f64) -> Option<f64> {
    if ot_weight < 0.0 || ot_weight.is_nan() {
        return None;
    }
    let ot_weight = ot_weight.min(1000.0);
    let upper = OPENTYPE_WEIGHTS
        .iter()
        .skip(1)
        .position(|(ot, _)| ot_weight <= *ot)?
        + 1;
    let (x2, y2) = OPENTYPE_WEIGHTS[upper];
    if ot_weight == x2 {
        return Some(y2);
    }
    let (x1, y1) = OPENTYPE_WEIGHTS[upper - 1];
    Some(y1 + (ot_weight - x1) * (y2 - y1) / (x2 - x1))
}

static WIDTH_CLASSES: [f64; 9] = [
    WIDTH_ULTRACONDENSED,
    WIDTH_EXTRACONDENSED,
    WIDTH_CONDENSED,
    WIDTH_SEMICONDENSED,
    WIDTH_NORMAL,
    WIDTH_SEMIEXPANDED,
    WIDTH_EXPANDED,
    WIDTH_EXTRAEXPANDED,
    WIDTH_ULTRAEXPANDED,
];

/// OS/2 `usWidthClass` (1 to 9) to a width bucket
pub fn width_from_class(class: i64) -> Option<f64> {
    usize::try_from(class - 1)
        .ok()
        .and_then(|i| WIDTH_CLASSES.get(i))
        .copied()
}

/// BDF RELATIVE_SETWIDTH (10 to 90) to a width bucket
pub fn width_from_relative_setwidth(value: i64) -> Option<f64> {
    width_from_class((value + 5) / 10)
}

/// Per-axis signals gathered from every style name of a face
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleClassification {
    pub weight: Option<f64>,
    pub width: Option<f64>,
    pub slant: Option<Slant>,
    pub decorative: bool,
}

/// Classify a face's style names; per axis the first string that says
/// something wins.
pub fn classify_styles<'a>(styles: impl IntoIterator<Item = &'a str>) -> StyleClassification {
    let mut class = StyleClassification::default();
    for style in styles {
        if class.weight.is_none() {
            class.weight = classify_weight(style);
        }
        if class.width.is_none() {
            class.width = classify_width(style);
        }
        if class.slant.is_none() {
            class.slant = classify_slant(style);
        }
        if !class.decorative {
            class.decorative = classify_decorative(style);
        }
        log::trace!("style {:?} maps to {:?}", style, class);
    }
    class
}

/// Non-name evidence for weight, width and slant, in precedence order
#[derive(Debug, Clone, Default)]
pub struct StyleEvidence<'a> {
    pub os2: Option<&'a Os2Info>,
    /// Scales the OS/2 weight class for named instances
    pub weight_multiplier: f64,
    /// Scales the OS/2 width class for named instances
    pub width_multiplier: f64,
    /// Type 1 FontInfo weight string
    pub ps_weight: Option<&'a str>,
    pub bdf_relative_setwidth: Option<i64>,
    pub bdf_setwidth_name: Option<&'a str>,
    pub flags: FaceFlags,
}

/// Final weight, width and slant of a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub weight: f64,
    pub width: f64,
    pub slant: Slant,
    pub decorative: bool,
}

/// Combine style-name classification with the numeric fallbacks
pub fn resolve_style(class: StyleClassification, evidence: &StyleEvidence<'_>) -> ResolvedStyle {
    let os2 = evidence.os2.filter(|os2| os2.is_valid());

    let weight = class
        .weight
        .or_else(|| {
            os2.and_then(|os2| {
                weight_from_opentype(os2.weight_class as f64 * evidence.weight_multiplier)
            })
        })
        .or_else(|| evidence.ps_weight.and_then(|w| lookup_exact(w, WEIGHT_KEYWORDS)))
        .unwrap_or(if evidence.flags.bold {
            WEIGHT_BOLD
        } else {
            WEIGHT_MEDIUM
        });

    let width = class
        .width
        .or_else(|| {
            os2.and_then(|os2| width_from_class(os2.width_class as i64))
                .map(|width| width * evidence.width_multiplier)
        })
        .or_else(|| {
            evidence
                .bdf_relative_setwidth
                .and_then(width_from_relative_setwidth)
        })
        .or_else(|| {
            evidence
                .bdf_setwidth_name
                .and_then(|name| lookup_exact(name, WIDTH_KEYWORDS))
        })
        .unwrap_or(WIDTH_NORMAL);

    let slant = class.slant.unwrap_or(if evidence.flags.italic {
        Slant::Italic
    } else {
        Slant::Roman
    });

    ResolvedStyle {
        weight,
        width,
        slant,
        decorative: class.decorative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn evidence() -> StyleEvidence<'static> {
        StyleEvidence {
            weight_multiplier: 1.0,
            width_multiplier: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_semicondensed_italic() {
        assert_eq!(classify_width("SemiCondensed Italic"), Some(WIDTH_SEMICONDENSED));
        assert_eq!(classify_slant("SemiCondensed Italic"), Some(Slant::Italic));
        assert_eq!(classify_width("UltraCondensed"), Some(WIDTH_ULTRACONDENSED));
        assert_eq!(classify_width("Condensed"), Some(WIDTH_CONDENSED));
    }

    #[test]
    fn test_ultra_as_a_word() {
        assert_eq!(classify_weight("Ultra Bold"), Some(WEIGHT_EXTRABOLD));
        assert_eq!(classify_weight("Ultra"), Some(WEIGHT_EXTRABOLD));
        assert_eq!(classify_weight("Compressed Ultra"), Some(WEIGHT_EXTRABOLD));
        assert_eq!(classify_weight("Superultra"), None);
    }

    #[test]
    fn test_exact_before_contains() {
        // "Demi" alone is exact; inside "Demilight" the table order decides
        assert_eq!(classify_weight("Demi"), Some(WEIGHT_DEMIBOLD));
        assert_eq!(classify_weight("Demi Light"), Some(WEIGHT_DEMILIGHT));
        assert_eq!(classify_weight("Semi Bold"), Some(WEIGHT_DEMIBOLD));
        assert_eq!(classify_weight("Bold Italic"), Some(WEIGHT_BOLD));
        assert_eq!(classify_weight("Heavy Oblique"), Some(WEIGHT_BLACK));
        assert_eq!(classify_weight("Italic"), None);
    }

    #[test]
    fn test_slant_and_decorative() {
        assert_eq!(classify_slant("Kursiv"), Some(Slant::Italic));
        assert_eq!(classify_slant("Bold Oblique"), Some(Slant::Oblique));
        assert_eq!(classify_slant("Regular"), None);
        assert!(classify_decorative("Small Caps"));
        assert!(classify_decorative("Shadow"));
        assert!(!classify_decorative("Bold"));
    }

    #[test]
    fn test_classify_styles_first_signal_per_axis() {
        let class = classify_styles(["Italic", "Bold Condensed", "Light Expanded"]);
        assert_eq!(
            class,
            StyleClassification {
                weight: Some(WEIGHT_BOLD),
                width: Some(WIDTH_CONDENSED),
                slant: Some(Slant::Italic),
                decorative: false,
            }
        );
    }

    #[test]
    fn test_weight_from_opentype() {
        assert_eq!(weight_from_opentype(100.0), Some(WEIGHT_THIN));
        assert_eq!(weight_from_opentype(400.0), Some(WEIGHT_REGULAR));
        assert_eq!(weight_from_opentype(700.0), Some(WEIGHT_BOLD));
        assert_eq!(weight_from_opentype(900.0), Some(WEIGHT_BLACK));
        assert_eq!(weight_from_opentype(450.0), Some(90.0));
        assert_eq!(weight_from_opentype(5000.0), Some(WEIGHT_EXTRABLACK));
        assert_eq!(weight_from_opentype(0.0), Some(WEIGHT_THIN));
        assert_eq!(weight_from_opentype(-1.0), None);
    }

    #[test]
    fn test_width_buckets() {
        assert_eq!(width_from_class(1), Some(WIDTH_ULTRACONDENSED));
        assert_eq!(width_from_class(5), Some(WIDTH_NORMAL));
        assert_eq!(width_from_class(9), Some(WIDTH_ULTRAEXPANDED));
        assert_eq!(width_from_class(0), None);
        assert_eq!(width_from_class(10), None);
        assert_eq!(width_from_relative_setwidth(50), Some(WIDTH_NORMAL));
        assert_eq!(width_from_relative_setwidth(34), Some(WIDTH_CONDENSED));
        assert_eq!(width_from_relative_setwidth(3), None);
    }

    #[test]
    fn test_style_names_win_over_os2() {
        let os2 = Os2Info {
            version: 4,
            weight_class: 400,
            width_class: 5,
            ..Default::default()
        };
        let evidence = StyleEvidence {
            os2: Some(&os2),
            ..evidence()
        };
        let resolved = resolve_style(classify_styles(["Bold Condensed"]), &evidence);
        assert_eq!(resolved.weight, WEIGHT_BOLD);
        assert_eq!(resolved.width, WIDTH_CONDENSED);

        let resolved = resolve_style(classify_styles(["Oblique"]), &evidence);
        assert_eq!(resolved.weight, WEIGHT_REGULAR);
        assert_eq!(resolved.width, WIDTH_NORMAL);
        assert_eq!(resolved.slant, Slant::Oblique);
    }

    #[test]
    fn test_os2_multipliers() {
        let os2 = Os2Info {
            version: 4,
            weight_class: 400,
            width_class: 5,
            ..Default::default()
        };
        let evidence = StyleEvidence {
            os2: Some(&os2),
            weight_multiplier: 1.75,
            width_multiplier: 0.75,
            ..Default::default()
        };
        let resolved = resolve_style(StyleClassification::default(), &evidence);
        assert_eq!(resolved.weight, WEIGHT_BOLD);
        assert_eq!(resolved.width, 75.0);
    }

    #[test]
    fn test_fallback_chain_without_os2() {
        let evidence = StyleEvidence {
            ps_weight: Some("Semibold"),
            bdf_relative_setwidth: Some(30),
            ..evidence()
        };
        let resolved = resolve_style(StyleClassification::default(), &evidence);
        assert_eq!(resolved.weight, WEIGHT_DEMIBOLD);
        assert_eq!(resolved.width, WIDTH_CONDENSED);

        let evidence = StyleEvidence {
            bdf_setwidth_name: Some("Semi Expanded"),
            ..self::evidence()
        };
        let resolved = resolve_style(StyleClassification::default(), &evidence);
        assert_eq!(resolved.width, WIDTH_SEMIEXPANDED);
    }

    #[test]
    fn test_flag_defaults() {
        let plain = resolve_style(StyleClassification::default(), &evidence());
        assert_eq!(
            plain,
            ResolvedStyle {
                weight: WEIGHT_MEDIUM,
                width: WIDTH_NORMAL,
                slant: Slant::Roman,
                decorative: false,
            }
        );

        let flagged = StyleEvidence {
            flags: FaceFlags {
                bold: true,
                italic: true,
                ..Default::default()
            },
            ..evidence()
        };
        let resolved = resolve_style(StyleClassification::default(), &flagged);
        assert_eq!(resolved.weight, WEIGHT_BOLD);
        assert_eq!(resolved.slant, Slant::Italic);
    }

    #[test]
    fn test_synthesized_os2_is_ignored() {
        let os2 = Os2Info {
            version: 0xFFFF,
            weight_class: 900,
            ..Default::default()
        };
        let evidence = StyleEvidence {
            os2: Some(&os2),
            ..evidence()
        };
        assert_eq!(
            resolve_style(StyleClassification::default(), &evidence).weight,
            WEIGHT_MEDIUM
        );
    }
}
