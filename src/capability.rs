// this_file: fontscan/src/capability.rs
//
// Complex-shaping capability string and hinting detection

use crate::face::{FontFace, LayoutTable};
use skrifa::Tag;

const SILF_CAPABILITY: &str = "ttable:Silf";
const OTLAYOUT_PREFIX: &str = "otlayout:";

/// Registered script tags are lowercase letters and spaces, except "DFLT"
fn is_valid_script(tag: Tag) -> bool {
    tag.to_be_bytes()
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b' ')
}

fn sorted_scripts(face: &dyn FontFace, table: LayoutTable) -> Vec<Tag> {
    let mut tags = face.script_tags(table);
    tags.sort_unstable();
    tags
}

/// Merge two sorted tag lists, keeping one copy of tags found in both
fn merge_sorted(gsub: &[Tag], gpos: &[Tag]) -> Vec<Tag> {
    let mut merged = Vec::with_capacity(gsub.len() + gpos.len());
    let (mut i, mut j) = (0, 0);
    while i < gsub.len() || j < gpos.len() {
        if i == gsub.len() {
            merged.push(gpos[j]);
            j += 1;
        } else if j == gpos.len() || gsub[i] < gpos[j] {
            merged.push(gsub[i]);
            i += 1;
        } else if gsub[i] == gpos[j] {
            merged.push(gsub[i]);
            i += 1;
            j += 1;
        } else {
            merged.push(gpos[j]);
            j += 1;
        }
    }
    merged
}

/// Space-separated shaping capabilities: `ttable:Silf` for Graphite fonts,
/// then `otlayout:<script>` for each GSUB/GPOS script. `None` when the face
/// has none of these.
pub fn font_capabilities(face: &dyn FontFace) -> Option<String> {
    let graphite = face.table_len(Tag::new(b"Silf")).is_some();
    let gsub = sorted_scripts(face, LayoutTable::Gsub);
    let gpos = sorted_scripts(face, LayoutTable::Gpos);
    if !graphite && gsub.is_empty() && gpos.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    if graphite {
        parts.push(SILF_CAPABILITY.to_string());
    }
    parts.extend(
        merge_sorted(&gsub, &gpos)
            .into_iter()
            .filter(|tag| is_valid_script(*tag))
            .map(|tag| format!("{}{}", OTLAYOUT_PREFIX, tag)),
    );
    log::trace!("capabilities: {}", parts.join(" "));
    Some(parts.join(" "))
}

/// Whether the face carries TrueType hinting programs.
///
/// A `prep` of 7 bytes or fewer is what unhinting tools leave behind.
pub fn has_hinting(face: &dyn FontFace) -> bool {
    face.table_len(Tag::new(b"fpgm")).is_some()
        || face.table_len(Tag::new(b"cvt ")).is_some()
        || face.table_len(Tag::new(b"prep")).is_some_and(|len| len > 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::mock::MockFace;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_capabilities() {
        assert_eq!(font_capabilities(&MockFace::new()), None);
    }

    #[test]
    fn test_merged_scripts() {
        let mut face = MockFace::new();
        face.gsub_scripts = vec![Tag::new(b"latn"), Tag::new(b"arab"), Tag::new(b"DFLT")];
        face.gpos_scripts = vec![Tag::new(b"latn"), Tag::new(b"cyrl")];
        assert_eq!(
            font_capabilities(&face).as_deref(),
            Some("otlayout:DFLT otlayout:arab otlayout:cyrl otlayout:latn")
        );
    }

    #[test]
    fn test_graphite_and_broken_tags() {
        let mut face = MockFace::new();
        face.tables.insert(Tag::new(b"Silf"), 120);
        face.gsub_scripts = vec![Tag::new(b"dev2"), Tag::new(&[0xFF, b'x', b'y', b'z'])];
        assert_eq!(
            font_capabilities(&face).as_deref(),
            Some("ttable:Silf otlayout:dev2")
        );

        let mut graphite_only = MockFace::new();
        graphite_only.tables.insert(Tag::new(b"Silf"), 120);
        assert_eq!(
            font_capabilities(&graphite_only).as_deref(),
            Some("ttable:Silf")
        );
    }

    #[test]
    fn test_has_hinting() {
        let mut face = MockFace::new();
        assert!(!has_hinting(&face));

        face.tables.insert(Tag::new(b"prep"), 7);
        assert!(!has_hinting(&face));

        face.tables.insert(Tag::new(b"prep"), 8);
        assert!(has_hinting(&face));

        let mut fpgm = MockFace::new();
        fpgm.tables.insert(Tag::new(b"fpgm"), 0);
        assert!(has_hinting(&fpgm));
    }
}
