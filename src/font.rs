// this_file: fontscan/src/font.rs
//
// Font file loading and the skrifa-backed face

use crate::{
    face::{
        FaceFlags, FontFace, LayoutTable, NameRecord, NamedInstance, Os2Info, VariationAxis,
    },
    tables::NAME_ID_VARIATIONS_PS_PREFIX,
    utils, woff, FontscanError, Result,
};
use memmap2::Mmap;
use skrifa::{
    charmap::Charmap,
    metrics::GlyphMetrics,
    outline::{DrawSettings, OutlinePen},
    prelude::*,
    raw::{FileRef, Offset, TableProvider},
    string::StringId,
    FontRef, GlyphId, OutlineGlyphCollection, Tag,
};
use std::{fs::File, path::Path};

enum FontData {
    Mapped(Mmap),
    /// sfnt rebuilt from a WOFF container
    Unwrapped(Vec<u8>),
}

/// A memory-mapped font file, possibly a collection
pub struct FontFile {
    data: FontData,
    wrapper: &'static str,
}

impl FontFile {
    /// Map a font file into memory, unwrapping WOFF
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mapped = unsafe { Mmap::map(&file).map_err(|e| FontscanError::Io(e.to_string()))? };
        let wrapper = utils::sniff_wrapper(&mapped);
        let data = if woff::is_woff(&mapped) {
            FontData::Unwrapped(woff::decode_woff(&mapped)?)
        } else if woff::is_woff2(&mapped) {
            return Err(FontscanError::ParserFailure(format!(
                "{}: WOFF2 is not supported",
                path.display()
            )));
        } else {
            FontData::Mapped(mapped)
        };
        let font_file = Self { data, wrapper };
        // validate the header up front so a bad file fails here
        FileRef::new(font_file.data())
            .map_err(|e| FontscanError::ParserFailure(e.to_string()))?;
        Ok(font_file)
    }

    /// The sfnt data, after unwrapping
    pub fn data(&self) -> &[u8] {
        match &self.data {
            FontData::Mapped(mmap) => &mmap[..],
            FontData::Unwrapped(bytes) => bytes.as_slice(),
        }
    }

    /// Container the sfnt was read from: "SFNT" or "WOFF"
    pub fn wrapper(&self) -> &'static str {
        self.wrapper
    }

    /// Number of faces in the file
    pub fn face_count(&self) -> usize {
        match FileRef::new(self.data()) {
            Ok(FileRef::Font(_)) => 1,
            Ok(FileRef::Collection(collection)) => collection.len() as usize,
            Err(_) => 0,
        }
    }

    pub fn face(&self, index: u32) -> Result<SkrifaFace<'_>> {
        let font = FontRef::from_index(self.data(), index)
            .map_err(|e| FontscanError::ParserFailure(format!("face {}: {}", index, e)))?;
        Ok(SkrifaFace::new(font))
    }
}

/// Check if a file is a font file based on its extension
pub fn is_font_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext_str = ext.to_string_lossy().to_lowercase();
        matches!(ext_str.as_str(), "ttf" | "otf" | "ttc" | "otc" | "woff")
    } else {
        false
    }
}

/// Counts closed contours
#[derive(Default)]
struct ContourCounter {
    contours: usize,
}

impl OutlinePen for ContourCounter {
    fn move_to(&mut self, _x: f32, _y: f32) {
        self.contours += 1;
    }

    fn line_to(&mut self, _x: f32, _y: f32) {}

    fn quad_to(&mut self, _cx0: f32, _cy0: f32, _x: f32, _y: f32) {}

    fn curve_to(&mut self, _cx0: f32, _cy0: f32, _cx1: f32, _cy1: f32, _x: f32, _y: f32) {}

    fn close(&mut self) {}
}

/// One face of a font file, read through skrifa
pub struct SkrifaFace<'a> {
    font: FontRef<'a>,
    charmap: Charmap<'a>,
    metrics: GlyphMetrics<'a>,
    outlines: OutlineGlyphCollection<'a>,
}

impl<'a> SkrifaFace<'a> {
    pub fn new(font: FontRef<'a>) -> Self {
        Self {
            charmap: font.charmap(),
            metrics: font.glyph_metrics(Size::unscaled(), LocationRef::default()),
            outlines: font.outline_glyphs(),
            font,
        }
    }

    pub fn font(&self) -> &FontRef<'a> {
        &self.font
    }

    fn has_table(&self, tag: &[u8; 4]) -> bool {
        self.font.table_data(Tag::new(tag)).is_some()
    }

    fn string(&self, id: u16) -> Option<String> {
        self.font
            .localized_strings(StringId::new(id))
            .english_or_first()
            .map(|s| s.to_string())
    }

    /// Instance PostScript name built from the variations prefix (or the
    /// family) and the instance subfamily
    fn derived_instance_postscript_name(&self, instance: &NamedInstance) -> Option<String> {
        let prefix = self
            .string(NAME_ID_VARIATIONS_PS_PREFIX)
            .or_else(|| self.default_family_name())?;
        let subfamily = self.string(instance.subfamily_name_id)?;
        let name: String = format!("{}-{}", prefix, subfamily)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        Some(name)
    }
}

impl FontFace for SkrifaFace<'_> {
    fn name_records(&self) -> Vec<NameRecord<'_>> {
        let Ok(name) = self.font.name() else {
            return Vec::new();
        };
        let storage = name.string_data().as_bytes();
        name.name_record()
            .iter()
            .filter_map(|record| {
                let start = record.string_offset().non_null().unwrap_or(0);
                let bytes = storage.get(start..start + record.length() as usize)?;
                Some(NameRecord {
                    platform_id: record.platform_id(),
                    encoding_id: record.encoding_id(),
                    language_id: record.language_id(),
                    name_id: record.name_id().to_u16(),
                    bytes,
                })
            })
            .collect()
    }

    fn os2(&self) -> Option<Os2Info> {
        let os2 = self.font.os2().ok()?;
        let code_page_range = os2
            .ul_code_page_range_1()
            .zip(os2.ul_code_page_range_2());
        let optical_point_size = os2
            .us_lower_optical_point_size()
            .zip(os2.us_upper_optical_point_size());
        Some(Os2Info {
            version: os2.version(),
            weight_class: os2.us_weight_class(),
            width_class: os2.us_width_class(),
            vendor_id: os2.ach_vend_id().to_be_bytes(),
            code_page_range,
            optical_point_size,
        })
    }

    fn font_revision(&self) -> Option<i32> {
        self.font
            .head()
            .ok()
            .map(|head| head.font_revision().to_bits())
    }

    fn variation_axes(&self) -> Vec<VariationAxis> {
        self.font
            .axes()
            .iter()
            .map(|axis| VariationAxis {
                tag: axis.tag(),
                min: axis.min_value() as f64,
                default: axis.default_value() as f64,
                max: axis.max_value() as f64,
            })
            .collect()
    }

    fn named_instances(&self) -> Vec<NamedInstance> {
        self.font
            .named_instances()
            .iter()
            .map(|instance| NamedInstance {
                subfamily_name_id: instance.subfamily_name_id().to_u16(),
                postscript_name_id: instance.postscript_name_id().map(|id| id.to_u16()),
                coords: instance.user_coords().map(|c| c as f64).collect(),
            })
            .collect()
    }

    fn script_tags(&self, table: LayoutTable) -> Vec<Tag> {
        let script_list = match table {
            LayoutTable::Gsub => self.font.gsub().and_then(|gsub| gsub.script_list()),
            LayoutTable::Gpos => self.font.gpos().and_then(|gpos| gpos.script_list()),
        };
        match script_list {
            Ok(list) => list
                .script_records()
                .iter()
                .map(|record| record.script_tag())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn table_len(&self, tag: Tag) -> Option<usize> {
        self.font.table_data(tag).map(|data| data.len())
    }

    fn flags(&self) -> FaceFlags {
        // fsSelection wins over macStyle when an OS/2 table is present
        let (italic, bold) = match (self.font.os2(), self.font.head()) {
            (Ok(os2), _) => {
                let bits = os2.fs_selection().bits();
                (bits & 0x0001 != 0, bits & 0x0020 != 0)
            }
            (Err(_), Ok(head)) => {
                let bits = head.mac_style().bits();
                (bits & 0x0002 != 0, bits & 0x0001 != 0)
            }
            _ => (false, false),
        };
        FaceFlags {
            scalable: self.has_table(b"glyf") || self.has_table(b"CFF ") || self.has_table(b"CFF2"),
            fixed_width: self
                .font
                .post()
                .is_ok_and(|post| post.is_fixed_pitch() != 0),
            italic,
            bold,
            color: self.has_table(b"COLR")
                || self.has_table(b"CBDT")
                || self.has_table(b"sbix")
                || self.has_table(b"SVG "),
        }
    }

    fn fixed_sizes(&self) -> Vec<f64> {
        let mut sizes: Vec<f64> = Vec::new();
        if let Ok(cblc) = self.font.cblc() {
            sizes.extend(cblc.bitmap_sizes().iter().map(|s| s.ppem_y() as f64));
        }
        if let Ok(eblc) = self.font.eblc() {
            sizes.extend(eblc.bitmap_sizes().iter().map(|s| s.ppem_y() as f64));
        }
        sizes
    }

    fn default_family_name(&self) -> Option<String> {
        self.string(StringId::FAMILY_NAME.to_u16())
    }

    fn default_style_name(&self) -> Option<String> {
        self.string(StringId::SUBFAMILY_NAME.to_u16())
    }

    fn postscript_name(&self, instance: Option<usize>) -> Option<String> {
        match instance {
            None => self.string(StringId::POSTSCRIPT_NAME.to_u16()),
            Some(index) => {
                let instance = self.named_instances().into_iter().nth(index)?;
                instance
                    .postscript_name_id
                    .filter(|id| *id != 0xFFFF)
                    .and_then(|id| self.string(id))
                    .or_else(|| self.derived_instance_postscript_name(&instance))
            }
        }
    }

    fn font_format(&self) -> Option<String> {
        let format = if self.has_table(b"CFF ") || self.has_table(b"CFF2") {
            "CFF"
        } else {
            "TrueType"
        };
        Some(format.to_string())
    }

    fn is_sfnt(&self) -> bool {
        true
    }

    fn char_mappings(&self) -> Vec<(u32, u32)> {
        self.charmap
            .mappings()
            .map(|(codepoint, glyph)| (codepoint, glyph.to_u32()))
            .filter(|(_, glyph)| *glyph != 0)
            .collect()
    }

    fn has_symbol_charmap(&self) -> bool {
        self.charmap.is_symbol()
    }

    fn advance_width(&self, glyph: u32) -> Option<i32> {
        self.metrics
            .advance_width(GlyphId::new(glyph))
            .map(|advance| advance.round() as i32)
    }

    fn glyph_is_blank(&self, glyph: u32) -> bool {
        let Some(outline) = self.outlines.get(GlyphId::new(glyph)) else {
            return true;
        };
        let mut pen = ContourCounter::default();
        let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
        match outline.draw(settings, &mut pen) {
            Ok(_) => pen.contours == 0,
            Err(e) => {
                log::trace!("glyph {} failed to draw: {}", glyph, e);
                true
            }
        }
    }
}
