// this_file: fontscan/src/names.rs
//
// Name-table indexing and per-field name selection

use crate::{
    face::NameRecord,
    tables::{
        self, Language, NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_MAC_FULL_NAME,
        NAME_ID_MANUFACTURER, NAME_ID_ORDER, NAME_ID_SUBFAMILY, NAME_ID_TRADEMARK,
        NAME_ID_TYPOGRAPHIC_FAMILY, NAME_ID_TYPOGRAPHIC_SUBFAMILY, NAME_ID_WWS_FAMILY,
        NAME_ID_WWS_SUBFAMILY, PLATFORM_ORDER,
    },
    transcode::{self, CharsetConverter},
    utils, FontscanError, Result,
};
use log::trace;
use serde::Serialize;
use std::cmp::Ordering;

/// Language tag for names whose language could not be determined
pub const UNDETERMINED: &str = "und";

/// Sortable projection of one name record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMapping {
    pub platform_id: u16,
    pub name_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    /// Position of the record in the face's name table
    pub index: usize,
}

impl NameMapping {
    fn key(&self) -> (u16, u16) {
        (self.platform_id, self.name_id)
    }
}

impl Ord for NameMapping {
    fn cmp(&self, other: &Self) -> Ordering {
        self.platform_id
            .cmp(&other.platform_id)
            .then(self.name_id.cmp(&other.name_id))
            .then(self.encoding_id.cmp(&other.encoding_id))
            .then_with(|| {
                if self.language_id == other.language_id {
                    return Ordering::Equal;
                }
                let self_english = tables::is_english(self.platform_id, self.language_id);
                let other_english = tables::is_english(other.platform_id, other.language_id);
                other_english
                    .cmp(&self_english)
                    .then(self.language_id.cmp(&other.language_id))
            })
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for NameMapping {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All name records of a face, sorted for lookup by (platform, name id).
///
/// Built once per face and shared by every instance queried from it.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    mappings: Vec<NameMapping>,
}

impl NameIndex {
    pub fn new(records: &[NameRecord<'_>]) -> Result<Self> {
        let mut mappings = Vec::new();
        mappings.try_reserve_exact(records.len())?;
        mappings.extend(records.iter().enumerate().map(|(index, record)| NameMapping {
            platform_id: record.platform_id,
            name_id: record.name_id,
            encoding_id: record.encoding_id,
            language_id: record.language_id,
            index,
        }));
        mappings.sort_unstable();
        Ok(Self { mappings })
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn mappings(&self) -> &[NameMapping] {
        &self.mappings
    }

    /// Position in the sorted mappings where the run for (platform, name id) begins
    fn run_start(&self, platform_id: u16, name_id: u16) -> Option<usize> {
        let key = (platform_id, name_id);
        let mut start = self
            .mappings
            .binary_search_by(|mapping| mapping.key().cmp(&key))
            .ok()?;
        while start > 0 && self.mappings[start - 1].key() == key {
            start -= 1;
        }
        Some(start)
    }

    /// Record index of the best-ranked record for (platform, name id)
    pub fn first_matching(&self, platform_id: u16, name_id: u16) -> Option<usize> {
        self.run_start(platform_id, name_id)
            .map(|start| self.mappings[start].index)
    }

    /// Record indices of every record for (platform, name id), best first
    pub fn run(&self, platform_id: u16, name_id: u16) -> impl Iterator<Item = usize> + '_ {
        let start = self.run_start(platform_id, name_id).unwrap_or(self.mappings.len());
        self.mappings[start..]
            .iter()
            .take_while(move |mapping| mapping.key() == (platform_id, name_id))
            .map(|mapping| mapping.index)
    }
}

/// A name value with its language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedName {
    pub value: String,
    pub lang: String,
}

impl LocalizedName {
    pub fn new(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: lang.into(),
        }
    }
}

/// The semantic field a name id feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameField {
    Family,
    FullName,
    Style,
    Notice,
}

impl NameField {
    fn of(name_id: u16) -> Option<Self> {
        match name_id {
            NAME_ID_WWS_FAMILY | NAME_ID_TYPOGRAPHIC_FAMILY | NAME_ID_FAMILY => Some(Self::Family),
            NAME_ID_MAC_FULL_NAME | NAME_ID_FULL_NAME => Some(Self::FullName),
            NAME_ID_WWS_SUBFAMILY | NAME_ID_TYPOGRAPHIC_SUBFAMILY | NAME_ID_SUBFAMILY => {
                Some(Self::Style)
            }
            NAME_ID_TRADEMARK | NAME_ID_MANUFACTURER => Some(Self::Notice),
            _ => None,
        }
    }
}

/// What a face's names are being selected for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameTarget {
    /// A static face or the default instance
    #[default]
    Face,
    /// A named instance, whose subfamily comes from this name id
    Instance { subfamily_name_id: u16 },
    /// The axis-range pattern of a variable face
    Variable,
}

/// Family, style and full names chosen for one face or instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedNames {
    pub families: Vec<LocalizedName>,
    pub styles: Vec<LocalizedName>,
    pub full_names: Vec<LocalizedName>,
    /// Foundry recognised in a trademark or manufacturer notice
    pub notice_foundry: Option<&'static str>,
}

/// Trim leading spaces and trailing spaces and line breaks
fn trim_name(text: &str) -> &str {
    text.trim_start_matches(' ')
        .trim_end_matches([' ', '\r', '\n'])
}

fn push_unique(names: &mut Vec<LocalizedName>, value: &str, lang: &str) -> Result<()> {
    if names
        .iter()
        .any(|name| utils::eq_ignore_blanks_and_case(&name.value, value))
    {
        return Ok(());
    }
    names.try_reserve(1)?;
    names.push(LocalizedName::new(value, lang));
    Ok(())
}

fn language_tag(record: &NameRecord<'_>) -> &'static str {
    match transcode::name_language(record) {
        Some(Language::Tag(tag)) => tag,
        Some(Language::Untagged) | None => UNDETERMINED,
    }
}

/// Transcode a record, absorbing every failure except running out of memory
fn transcode_lenient(
    record: &NameRecord<'_>,
    converter: &dyn CharsetConverter,
) -> Result<Option<String>> {
    match transcode::transcode(record, converter) {
        Ok(text) => Ok(Some(text)),
        Err(e @ FontscanError::AllocationFailure(_)) => Err(e),
        Err(e) => {
            trace!(
                "skipping name {} (p {} e {} l 0x{:04x}): {}",
                record.name_id,
                record.platform_id,
                record.encoding_id,
                record.language_id,
                e
            );
            Ok(None)
        }
    }
}

/// Walk the name table in platform and name-id preference order and collect
/// every usable family, style and full name.
pub fn select_names(
    records: &[NameRecord<'_>],
    index: &NameIndex,
    converter: &dyn CharsetConverter,
    target: NameTarget,
) -> Result<SelectedNames> {
    let mut selected = SelectedNames::default();
    let variable = target == NameTarget::Variable;

    for platform_id in PLATFORM_ORDER {
        for name_id in NAME_ID_ORDER {
            let mut lookup_id = name_id;
            if let NameTarget::Instance { subfamily_name_id } = target {
                // instances label themselves through their own subfamily id
                if matches!(
                    name_id,
                    NAME_ID_WWS_SUBFAMILY | NAME_ID_TYPOGRAPHIC_SUBFAMILY | NAME_ID_FULL_NAME
                ) {
                    continue;
                }
                if name_id == NAME_ID_SUBFAMILY {
                    lookup_id = subfamily_name_id;
                }
            }
            let Some(field) = NameField::of(name_id) else {
                continue;
            };
            if variable && matches!(field, NameField::FullName | NameField::Style) {
                continue;
            }

            for record_index in index.run(platform_id, lookup_id) {
                let Some(record) = records.get(record_index) else {
                    continue;
                };
                if field == NameField::Notice {
                    if selected.notice_foundry.is_none() {
                        if let Some(text) = transcode_lenient(record, converter)? {
                            selected.notice_foundry = tables::notice_foundry(&text);
                        }
                    }
                    continue;
                }
                let Some(text) = transcode_lenient(record, converter)? else {
                    continue;
                };
                let value = trim_name(&text);
                if value.is_empty() {
                    continue;
                }
                let lang = language_tag(record);
                trace!(
                    "found {:?} (n {:2} p {} e {} l 0x{:04x}) {}",
                    field,
                    record.name_id,
                    record.platform_id,
                    record.encoding_id,
                    record.language_id,
                    value
                );
                let names = match field {
                    NameField::Family => &mut selected.families,
                    NameField::Style => &mut selected.styles,
                    NameField::FullName => &mut selected.full_names,
                    NameField::Notice => continue,
                };
                push_unique(names, value, lang)?;
            }
        }
    }
    Ok(selected)
}

/// PostScript literal names cannot hold these
const POSTSCRIPT_EXCLUDED: &[char] = &[
    '\x04', '(', ')', '/', '<', '>', '[', ']', '{', '}', '\t', '\x0c', '\r', '\n', ' ',
];

const POSTSCRIPT_NAME_MAX: usize = 255;

/// First English-tagged name, or the first one of any language
pub fn first_english(names: &[LocalizedName]) -> Option<&LocalizedName> {
    names
        .iter()
        .find(|name| name.lang == "en")
        .or_else(|| names.first())
}

/// Build a PostScript name from a family name
pub fn synthesize_postscript_name(family: &str) -> String {
    family
        .chars()
        .take(POSTSCRIPT_NAME_MAX)
        .map(|c| if POSTSCRIPT_EXCLUDED.contains(&c) { '-' } else { c })
        .collect()
}

/// Face-level defaults consulted when the name table yields nothing usable
#[derive(Debug, Clone, Copy, Default)]
pub struct NameDefaults<'a> {
    pub family: Option<&'a str>,
    pub style: Option<&'a str>,
    pub file: Option<&'a str>,
}

impl SelectedNames {
    /// Fill in family, style and full name from face defaults, the file name
    /// and each other, tagging every synthesized value "en".
    pub fn apply_fallbacks(&mut self, defaults: NameDefaults<'_>, variable: bool) {
        let non_blank = |s: &&str| !utils::eq_ignore_blanks_and_case(s, "");

        if self.families.is_empty() {
            if let Some(family) = defaults.family.filter(non_blank) {
                trace!("using default family \"{}\"", family);
                self.families.push(LocalizedName::new(family, "en"));
            }
        }

        if !variable && self.styles.is_empty() {
            let style = defaults.style.filter(non_blank).unwrap_or("Regular");
            trace!("using default style \"{}\"", style);
            self.styles.push(LocalizedName::new(style, "en"));
        }

        if self.families.is_empty() {
            if let Some(file) = defaults.file.filter(|f| !f.is_empty()) {
                let family = utils::family_from_path(file);
                trace!("using filename for family {}", family);
                self.families.push(LocalizedName::new(family, "en"));
            }
        }

        if !variable && self.full_names.is_empty() {
            if let (Some(family), Some(style)) =
                (first_english(&self.families), first_english(&self.styles))
            {
                let full_name = format!(
                    "{} {}",
                    family.value.trim_end(),
                    style.value.trim_start()
                );
                self.full_names.push(LocalizedName::new(full_name, "en"));
            }
        }
    }
}
