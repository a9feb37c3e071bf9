// this_file: fontscan/src/face.rs
//
// The font-parser seam: everything the metadata assembler reads from a face,
// expressed as plain records.

use skrifa::Tag;

/// One raw entry of a face's name table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRecord<'a> {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub bytes: &'a [u8],
}

/// The OS/2 fields the assembler consumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Os2Info {
    pub version: u16,
    pub weight_class: u16,
    pub width_class: u16,
    pub vendor_id: [u8; 4],
    /// `ulCodePageRange1` and `ulCodePageRange2`, version 1 and later
    pub code_page_range: Option<(u32, u32)>,
    /// Lower and upper optical point size in twips, version 5 and later
    pub optical_point_size: Option<(u16, u16)>,
}

impl Os2Info {
    /// Version 0xFFFF marks a synthesized table (Mac fonts without OS/2)
    pub fn is_valid(&self) -> bool {
        self.version != 0xFFFF
    }
}

/// Type 1 FontInfo dictionary entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PsFontInfo {
    pub weight: Option<String>,
    pub notice: Option<String>,
}

/// A BDF/PCF font property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BdfProperty {
    Atom(String),
    Integer(i32),
    Cardinal(u32),
}

impl BdfProperty {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            BdfProperty::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BdfProperty::Integer(v) => Some(*v as i64),
            BdfProperty::Cardinal(v) => Some(*v as i64),
            BdfProperty::Atom(_) => None,
        }
    }
}

/// A design-variation axis in user coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationAxis {
    pub tag: Tag,
    pub min: f64,
    pub default: f64,
    pub max: f64,
}

/// A named instance: user coordinates for every axis, in axis order
#[derive(Debug, Clone, PartialEq)]
pub struct NamedInstance {
    pub subfamily_name_id: u16,
    pub postscript_name_id: Option<u16>,
    pub coords: Vec<f64>,
}

/// Face-level flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceFlags {
    /// Outline glyphs are available
    pub scalable: bool,
    pub fixed_width: bool,
    pub italic: bool,
    pub bold: bool,
    /// Color glyphs (COLR, CBDT, sbix or SVG)
    pub color: bool,
}

/// OpenType layout tables carrying script lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTable {
    Gsub,
    Gpos,
}

/// A decoded font face, as seen by the metadata assembler.
///
/// Implemented over skrifa by [`crate::font::SkrifaFace`]; optional sources
/// (PostScript FontInfo, BDF properties) default to absent.
pub trait FontFace {
    /// All name records, in name-table order
    fn name_records(&self) -> Vec<NameRecord<'_>>;

    fn os2(&self) -> Option<Os2Info>;

    /// `head.fontRevision` as raw 16.16
    fn font_revision(&self) -> Option<i32>;

    fn ps_font_info(&self) -> Option<PsFontInfo> {
        None
    }

    fn bdf_property(&self, _name: &str) -> Option<BdfProperty> {
        None
    }

    fn variation_axes(&self) -> Vec<VariationAxis>;

    fn named_instances(&self) -> Vec<NamedInstance>;

    /// Script tags of a layout table's script list, in table order
    fn script_tags(&self, table: LayoutTable) -> Vec<Tag>;

    /// Length in bytes of a table, `None` if the face lacks it
    fn table_len(&self, tag: Tag) -> Option<usize>;

    fn flags(&self) -> FaceFlags;

    /// Pixel heights of the bitmap strikes
    fn fixed_sizes(&self) -> Vec<f64>;

    fn default_family_name(&self) -> Option<String>;

    fn default_style_name(&self) -> Option<String>;

    /// PostScript name of the default instance, or of the given named instance
    fn postscript_name(&self, instance: Option<usize>) -> Option<String>;

    /// Container-independent format name, e.g. "TrueType" or "CFF"
    fn font_format(&self) -> Option<String>;

    fn is_sfnt(&self) -> bool;

    /// (codepoint, glyph id) pairs of the selected character map, ascending
    fn char_mappings(&self) -> Vec<(u32, u32)>;

    /// Whether the selected character map is a Microsoft symbol cmap
    fn has_symbol_charmap(&self) -> bool;

    /// Unscaled, unhinted advance width
    fn advance_width(&self, glyph: u32) -> Option<i32>;

    /// Whether a glyph has no outline contours
    fn glyph_is_blank(&self, glyph: u32) -> bool;
}
