// this_file: fontscan/tests/integration.rs
//
// End-to-end checks through the public API

use clap::Parser;
use fontscan::{
    cli::{self, Cli},
    face::{FaceFlags, LayoutTable, NameRecord, NamedInstance, Os2Info, VariationAxis},
    names::LocalizedName,
    properties::PropertyValue,
    query::{collect_font_files, scan, ScanCriteria, ScanOptions},
    query, query_all, query_with_session,
    style::{Slant, WEIGHT_BOLD, WIDTH_NORMAL},
    FaceSession, FontFace, FontscanError, InstanceId,
};
use skrifa::Tag;
use std::{fs, path::PathBuf, sync::Arc};

/// A static face with a Windows name table and an ASCII cmap
struct StaticFace {
    names: Vec<(u16, Vec<u8>)>,
}

impl StaticFace {
    fn new(family: &str, style: &str) -> Self {
        let utf16 =
            |s: &str| -> Vec<u8> { s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect() };
        Self {
            names: vec![(1, utf16(family)), (2, utf16(style))],
        }
    }
}

impl FontFace for StaticFace {
    fn name_records(&self) -> Vec<NameRecord<'_>> {
        self.names
            .iter()
            .map(|(name_id, bytes)| NameRecord {
                platform_id: 3,
                encoding_id: 1,
                language_id: 0x0409,
                name_id: *name_id,
                bytes,
            })
            .collect()
    }

    fn os2(&self) -> Option<Os2Info> {
        None
    }

    fn font_revision(&self) -> Option<i32> {
        Some(0x0001_8000)
    }

    fn variation_axes(&self) -> Vec<VariationAxis> {
        Vec::new()
    }

    fn named_instances(&self) -> Vec<NamedInstance> {
        Vec::new()
    }

    fn script_tags(&self, _table: LayoutTable) -> Vec<Tag> {
        Vec::new()
    }

    fn table_len(&self, _tag: Tag) -> Option<usize> {
        None
    }

    fn flags(&self) -> FaceFlags {
        FaceFlags {
            scalable: true,
            ..Default::default()
        }
    }

    fn fixed_sizes(&self) -> Vec<f64> {
        Vec::new()
    }

    fn default_family_name(&self) -> Option<String> {
        None
    }

    fn default_style_name(&self) -> Option<String> {
        None
    }

    fn postscript_name(&self, _instance: Option<usize>) -> Option<String> {
        None
    }

    fn font_format(&self) -> Option<String> {
        Some("TrueType".to_string())
    }

    fn is_sfnt(&self) -> bool {
        true
    }

    fn char_mappings(&self) -> Vec<(u32, u32)> {
        (0x20..0x7F).map(|c| (c, c - 0x1F)).collect()
    }

    fn has_symbol_charmap(&self) -> bool {
        false
    }

    fn advance_width(&self, _glyph: u32) -> Option<i32> {
        Some(600)
    }

    fn glyph_is_blank(&self, glyph: u32) -> bool {
        glyph == 1
    }
}

#[test]
fn test_query_static_face() {
    let face = StaticFace::new("Example Sans", "Bold");
    let props = query(&face, None, InstanceId(0)).unwrap();

    assert_eq!(props.family, vec![LocalizedName::new("Example Sans", "en")]);
    assert_eq!(props.style, vec![LocalizedName::new("Bold", "en")]);
    assert_eq!(props.weight, PropertyValue::Single(WEIGHT_BOLD));
    assert_eq!(props.width, PropertyValue::Single(WIDTH_NORMAL));
    assert_eq!(props.slant, Slant::Roman);
    assert_eq!(props.postscript_name.as_deref(), Some("Example-Sans"));
    assert_eq!(props.foundry, "unknown");
    assert_eq!(props.font_version, 0x0001_8000);
    assert!(props.outline && props.scalable);
    assert!(!props.variable && !props.named_instance);
    assert!(props.charset.contains('A' as u32));
    assert!(props.langs.contains("en"));
    assert_eq!(props.file, None);
}

#[test]
fn test_blank_family_uses_file_name() {
    let face = StaticFace::new("\r\n", "Bold");
    let path = PathBuf::from("/nonexistent/fonts/Fallback-Sans.ttf");
    let props = query(&face, Some(&path), InstanceId(0)).unwrap();

    assert_eq!(props.family, vec![LocalizedName::new("Fallback-Sans", "en")]);
    assert_eq!(
        props.full_name,
        vec![LocalizedName::new("Fallback-Sans Bold", "en")]
    );
    assert_eq!(props.file, Some(path));
}

#[test]
fn test_session_shares_coverage() {
    let face = StaticFace::new("Example Sans", "Regular");
    let mut session = FaceSession::new();
    let first = query_with_session(&face, None, InstanceId(0), &mut session).unwrap();
    let second = query_with_session(&face, None, InstanceId(0), &mut session).unwrap();

    assert!(Arc::ptr_eq(&first.charset, &second.charset));
    assert!(Arc::ptr_eq(&first.langs, &second.langs));
    assert_eq!(first, second);

    // a static face has no named instances and no variable pattern
    assert!(matches!(
        query_with_session(&face, None, InstanceId::new(0, 1), &mut session),
        Err(FontscanError::InvalidInstance(0x0001_0000))
    ));
    assert!(matches!(
        query_with_session(&face, None, InstanceId::variable(0), &mut session),
        Err(FontscanError::NoVariations)
    ));
}

#[test]
fn test_query_all_rejects_non_font() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ttf");
    fs::write(&path, b"not a font at all").unwrap();

    assert!(matches!(
        query_all(&path),
        Err(FontscanError::ParserFailure(_))
    ));
}

#[test]
fn test_scan_skips_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ttf"), b"junk").unwrap();
    fs::write(dir.path().join("b.otf"), b"more junk").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let paths = vec![dir.path().to_path_buf()];
    let files = collect_font_files(&paths);
    assert_eq!(files.len(), 2);

    let options = ScanOptions {
        jobs: 2,
        criteria: ScanCriteria::default(),
    };
    let results = scan(&paths, &options).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_instance_id_layout() {
    let id = InstanceId::new(3, 2);
    assert_eq!(id.0, 0x0002_0003);
    assert_eq!(id.face(), 3);
    assert_eq!(id.instance(), 2);
    assert!(id.is_named_instance());
    assert!(!id.is_variable());

    let variable = InstanceId::variable(1);
    assert!(variable.is_variable());
    assert!(!variable.is_named_instance());
    assert_eq!(variable.to_string(), "0x80000001");
}

#[test]
fn test_cli_query_missing_file() {
    let missing: PathBuf = tempfile::tempdir().unwrap().path().join("gone.ttf");
    let cli = Cli::try_parse_from(["fontscan", "query", missing.to_str().unwrap()]).unwrap();
    assert!(matches!(cli::execute(cli), Err(FontscanError::Io(_))));
}

#[test]
fn test_cli_rejects_bad_index() {
    assert!(Cli::try_parse_from(["fontscan", "query", "a.ttf", "--index", "0xnope"]).is_err());
}
