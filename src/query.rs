// this_file: fontscan/src/query.rs
//
// Metadata assembly for faces and instances, and parallel directory scans

use crate::{
    capability,
    charset::{self, CharSet, Spacing},
    face::{FontFace, NamedInstance, Os2Info, VariationAxis},
    font::{is_font_file, FontFile},
    langset::{self, LangSet},
    matchers::{self, FontMatcher},
    names::{self, NameDefaults, NameIndex, NameTarget},
    properties::{FontProperties, FontPropertiesBuilder, PropertyValue},
    style::{self, StyleEvidence},
    tables,
    transcode::{CharsetConverter, EncodingRsConverter},
    utils::{self, get_file_size},
    FontscanError, Result,
};
use log::{debug, trace, warn};
use rayon::prelude::*;
use skrifa::Tag;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};
use walkdir::WalkDir;

const WGHT: Tag = Tag::new(b"wght");
const WDTH: Tag = Tag::new(b"wdth");
const OPSZ: Tag = Tag::new(b"opsz");

/// Face index in the low 16 bits, instance number in the high 16 bits.
///
/// Instance 0 is the default instance, `1..=n` the named instances, and
/// [`InstanceId::VARIABLE`] the axis-range pattern of a variable face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl InstanceId {
    pub const VARIABLE: u16 = 0x8000;

    pub fn new(face: u16, instance: u16) -> Self {
        Self(((instance as u32) << 16) | face as u32)
    }

    pub fn variable(face: u16) -> Self {
        Self::new(face, Self::VARIABLE)
    }

    pub fn face(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    pub fn instance(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn is_variable(self) -> bool {
        self.instance() == Self::VARIABLE
    }

    /// A named instance, not the default instance or the variable pattern
    pub fn is_named_instance(self) -> bool {
        self.instance() != 0 && !self.is_variable()
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Per-face state shared by every query against the same face.
///
/// Create one before querying the first instance of a face and drop it
/// after the last; it must not be reused for a different face.
pub struct FaceSession {
    converter: Arc<dyn CharsetConverter>,
    name_index: Option<NameIndex>,
    coverage: Option<(Arc<CharSet>, Spacing)>,
    langs: Option<Arc<LangSet>>,
    wrapper: Option<&'static str>,
}

impl Default for FaceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceSession {
    pub fn new() -> Self {
        Self::with_converter(Arc::new(EncodingRsConverter))
    }

    /// Use another transcoder for the legacy name-table charsets
    pub fn with_converter(converter: Arc<dyn CharsetConverter>) -> Self {
        Self {
            converter,
            name_index: None,
            coverage: None,
            langs: None,
            wrapper: None,
        }
    }

    /// Set the sfnt wrapper from the first bytes of the font file
    pub fn with_header(self, header: &[u8]) -> Self {
        self.with_wrapper(utils::sniff_wrapper(header))
    }

    pub fn with_wrapper(mut self, wrapper: &'static str) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    fn coverage(&mut self, face: &dyn FontFace) -> Result<(Arc<CharSet>, Spacing)> {
        if let Some(coverage) = &self.coverage {
            return Ok(coverage.clone());
        }
        let charset = Arc::new(CharSet::from_face(face)?);
        let spacing = charset::face_spacing(face);
        self.coverage = Some((charset.clone(), spacing));
        Ok((charset, spacing))
    }

    fn langs(&mut self, charset: &CharSet, symbol: bool, exclusive: Option<&str>) -> Arc<LangSet> {
        self.langs
            .get_or_insert_with(|| {
                if symbol {
                    Arc::new(LangSet::new())
                } else {
                    Arc::new(LangSet::from_charset(charset, exclusive))
                }
            })
            .clone()
    }
}

/// Axis range is well-formed and actually varies
fn axis_varies(axis: &VariationAxis) -> bool {
    axis.min <= axis.default && axis.default <= axis.max && axis.min != axis.max
}

/// Foundry from the OS/2 vendor id, if set
fn vendor_foundry(os2: &Os2Info) -> Option<String> {
    if !os2.is_valid() || os2.vendor_id[0] == 0 {
        return None;
    }
    let end = os2.vendor_id.iter().position(|b| *b == 0).unwrap_or(4);
    Some(os2.vendor_id[..end].iter().map(|b| *b as char).collect())
}

/// Weight, width and size ranges of the variable pattern
fn apply_variable_axes(
    builder: &mut FontPropertiesBuilder,
    axes: &[VariationAxis],
    id: InstanceId,
) -> Result<()> {
    let mut varies = false;
    for axis in axes.iter().filter(|axis| axis_varies(axis)) {
        match axis.tag {
            WGHT => {
                let min = style::weight_from_opentype(axis.min).unwrap_or(style::WEIGHT_THIN);
                let max = style::weight_from_opentype(axis.max).unwrap_or(style::WEIGHT_EXTRABLACK);
                builder.weight_range(min, max);
            }
            WDTH => {
                builder.width_range(axis.min, axis.max);
            }
            OPSZ => {
                builder.size(PropertyValue::Range {
                    min: axis.min,
                    max: axis.max,
                });
            }
            _ => continue,
        }
        trace!("{}: axis {} varies {}..{}", id, axis.tag, axis.min, axis.max);
        varies = true;
    }
    if varies {
        Ok(())
    } else {
        Err(FontscanError::NoVariations)
    }
}

/// Multipliers for the OS/2 weight and width classes of a named instance
fn apply_instance_coords(
    builder: &mut FontPropertiesBuilder,
    axes: &[VariationAxis],
    instance: &NamedInstance,
) -> (f64, f64) {
    let (mut weight_mult, mut width_mult) = (1.0, 1.0);
    for (axis, value) in axes.iter().zip(&instance.coords) {
        let mult = if axis.default == 0.0 {
            1.0
        } else {
            value / axis.default
        };
        match axis.tag {
            WGHT => weight_mult = mult,
            WDTH => width_mult = mult,
            OPSZ => {
                builder.size(PropertyValue::Single(*value));
            }
            _ => {}
        }
    }
    (weight_mult, width_mult)
}

/// Query one face or instance with a fresh session
pub fn query(face: &dyn FontFace, file: Option<&Path>, id: InstanceId) -> Result<FontProperties> {
    let mut session = FaceSession::new();
    if let Some(header) = file.and_then(|path| utils::read_header(path).ok()) {
        session = session.with_header(&header);
    }
    query_with_session(face, file, id, &mut session)
}

/// Query one face or instance, reusing the names, coverage and languages
/// already computed for the face in `session`
pub fn query_with_session(
    face: &dyn FontFace,
    file: Option<&Path>,
    id: InstanceId,
    session: &mut FaceSession,
) -> Result<FontProperties> {
    let mut builder = FontPropertiesBuilder::new(id.0);
    let axes = face.variation_axes();
    let os2 = face.os2();
    let flags = face.flags();

    let (mut weight_mult, mut width_mult) = (1.0, 1.0);
    let mut named_instance = None;
    let target = if id.is_variable() {
        builder.variable(true);
        apply_variable_axes(&mut builder, &axes, id)?;
        NameTarget::Variable
    } else if id.instance() > 0 {
        let instances = face.named_instances();
        let instance = instances
            .get(id.instance() as usize - 1)
            .filter(|_| !axes.is_empty())
            .ok_or(FontscanError::InvalidInstance(id.0))?;
        (weight_mult, width_mult) = apply_instance_coords(&mut builder, &axes, instance);
        builder.named_instance(true);
        named_instance = Some(id.instance() as usize - 1);
        NameTarget::Instance {
            subfamily_name_id: instance.subfamily_name_id,
        }
    } else {
        if let Some(opsz) = axes.iter().find(|axis| axis.tag == OPSZ) {
            builder.size(PropertyValue::Single(opsz.default));
        }
        NameTarget::Face
    };
    let variable = id.is_variable();

    // names
    let records = face.name_records();
    if session.name_index.is_none() {
        session.name_index = Some(NameIndex::new(&records)?);
    }
    let selected = match &session.name_index {
        Some(index) => names::select_names(&records, index, session.converter.as_ref(), target)?,
        None => return Err(FontscanError::ParserFailure("name index".to_string())),
    };
    let notice_foundry = selected.notice_foundry;
    // only names found in the table classify; the "Regular" placeholder
    // must not mask the numeric sources
    let class = style::classify_styles(selected.styles.iter().map(|name| name.value.as_str()));
    builder.names(selected);

    let default_family = face.default_family_name();
    let default_style = face.default_style_name();
    let file_name = file.map(|path| path.to_string_lossy());
    builder.name_fallbacks(NameDefaults {
        family: default_family.as_deref(),
        style: default_style.as_deref(),
        file: file_name.as_deref(),
    });

    // foundry
    let ps_info = face.ps_font_info();
    let foundry = os2
        .as_ref()
        .and_then(vendor_foundry)
        .or_else(|| notice_foundry.map(str::to_string))
        .or_else(|| {
            ps_info
                .as_ref()
                .and_then(|info| info.notice.as_deref())
                .and_then(tables::notice_foundry)
                .map(str::to_string)
        })
        .or_else(|| {
            face.bdf_property("FOUNDRY")
                .and_then(|prop| prop.as_atom().map(str::to_string))
        });
    if let Some(foundry) = foundry {
        builder.foundry(foundry);
    }

    // weight, width, slant
    let setwidth_name = face.bdf_property("SETWIDTH_NAME");
    let evidence = StyleEvidence {
        os2: os2.as_ref(),
        weight_multiplier: weight_mult,
        width_multiplier: width_mult,
        ps_weight: ps_info.as_ref().and_then(|info| info.weight.as_deref()),
        bdf_relative_setwidth: face
            .bdf_property("RELATIVE_SETWIDTH")
            .and_then(|prop| prop.as_integer()),
        bdf_setwidth_name: setwidth_name.as_ref().and_then(|prop| prop.as_atom()),
        flags,
    };
    builder.style(style::resolve_style(class, &evidence));

    // PostScript name
    if !variable {
        let postscript_name = face.postscript_name(named_instance).or_else(|| {
            names::first_english(&builder.selected_names().families)
                .map(|family| names::synthesize_postscript_name(&family.value))
        });
        builder.postscript_name(postscript_name);
    }

    if let Some(path) = file.filter(|path| !path.as_os_str().is_empty()) {
        builder.file(Some(
            utils::canonical_path(path).unwrap_or_else(|_| path.to_path_buf()),
        ));
    }
    builder.font_version(face.font_revision().unwrap_or(0));

    let valid_os2 = os2.as_ref().filter(|os2| os2.is_valid());
    let exclusive_lang = valid_os2
        .filter(|os2| os2.version >= 1)
        .and_then(|os2| os2.code_page_range)
        .and_then(|(r1, r2)| langset::exclusive_lang_from_os2(r1, r2));

    if os2.is_some() {
        builder.capability(
            capability::font_capabilities(face),
            capability::has_hinting(face),
        );
    } else {
        builder.capability(None, capability::has_hinting(face));
    }

    if !builder.has_size() {
        if let Some((lower, upper)) = valid_os2
            .filter(|os2| os2.version >= 5)
            .and_then(|os2| os2.optical_point_size)
        {
            builder.size(PropertyValue::range(
                lower as f64 / 20.0,
                upper as f64 / 20.0,
            ));
        }
    }

    // coverage
    let (charset, spacing) = session.coverage(face)?;
    if charset.is_empty() && face.bdf_property("PIXEL_SIZE").is_some() {
        return Err(FontscanError::ParserFailure(
            "bitmap face with empty character coverage".to_string(),
        ));
    }
    let symbol = face.has_symbol_charmap();
    let langs = session.langs(&charset, symbol, exclusive_lang);
    builder
        .coverage(charset, langs)
        .spacing(spacing)
        .symbol(symbol)
        .outline(flags.scalable, flags.color);

    if !flags.scalable {
        let strikes = face.fixed_sizes();
        let pixel_size = face
            .bdf_property("PIXEL_SIZE")
            .and_then(|prop| prop.as_integer());
        let sizes = match (strikes.len(), pixel_size) {
            (1, Some(pixel_size)) => vec![pixel_size as f64],
            _ => strikes,
        };
        builder.pixel_sizes(sizes).antialias(false);
    }

    let format = face.font_format();
    let wrapper = if face.is_sfnt() {
        session.wrapper.map(str::to_string)
    } else if format.as_deref() == Some("CFF") {
        Some("CFF".to_string())
    } else {
        None
    };
    builder.format(format, wrapper);

    let props = builder.build();
    debug!(
        "{} {}: {:?} weight {:?} width {:?} slant {:?}",
        file.map(|path| path.display().to_string())
            .unwrap_or_default(),
        id,
        props.primary_family(),
        props.weight,
        props.width,
        props.slant
    );
    Ok(props)
}

/// Named instance at the axis defaults duplicates the default instance
fn is_default_instance(instance: &NamedInstance, axes: &[VariationAxis]) -> bool {
    instance.coords.len() == axes.len()
        && axes
            .iter()
            .zip(&instance.coords)
            .all(|(axis, value)| axis.default == *value)
}

/// Every face in a file: per face the default instance, then the named
/// instances, then the variable pattern.
///
/// A failure stops the walk. What was collected before it is returned; the
/// error is returned only when nothing was.
pub fn query_all(path: &Path) -> Result<Vec<FontProperties>> {
    let file = FontFile::open(path)?;
    query_all_faces(&file, path)
}

fn query_all_faces(file: &FontFile, path: &Path) -> Result<Vec<FontProperties>> {
    let mut results = Vec::new();
    let mut failure = None;

    'faces: for face_index in 0..file.face_count() {
        let face = match file.face(face_index as u32) {
            Ok(face) => face,
            Err(e) => {
                failure = Some(e);
                break;
            }
        };
        let mut session = FaceSession::new().with_wrapper(file.wrapper());
        let axes = face.variation_axes();
        let instances = face.named_instances();

        let mut ids = vec![InstanceId::new(face_index as u16, 0)];
        for (k, instance) in instances.iter().enumerate() {
            if is_default_instance(instance, &axes) {
                trace!("{}: instance {} is the default, skipping", path.display(), k + 1);
                continue;
            }
            ids.push(InstanceId::new(face_index as u16, k as u16 + 1));
        }
        if !axes.is_empty() {
            ids.push(InstanceId::variable(face_index as u16));
        }

        for id in ids {
            match query_with_session(&face, Some(path), id, &mut session) {
                Ok(props) => results.push(props),
                Err(e) if id.is_variable() => {
                    debug!("{} {}: no variable pattern: {}", path.display(), id, e)
                }
                Err(e) => {
                    failure = Some(e);
                    break 'faces;
                }
            }
        }
    }

    match failure {
        Some(e) if results.is_empty() => Err(e),
        Some(e) => {
            warn!("{}: stopped after {} patterns: {}", path.display(), results.len(), e);
            Ok(results)
        }
        None => Ok(results),
    }
}

/// Filters applied to scan results
#[derive(Debug, Clone, Default)]
pub struct ScanCriteria {
    /// Regular expressions matched against family and full names
    pub name_patterns: Vec<String>,
    /// Language tags every result must support
    pub langs: Vec<String>,
    /// OpenType script tags every result must carry
    pub scripts: Vec<String>,
    /// Characters every result must cover
    pub codepoints: Vec<char>,
    /// Only variable patterns and named instances
    pub variable: bool,
}

impl ScanCriteria {
    pub fn is_empty(&self) -> bool {
        self.name_patterns.is_empty()
            && self.langs.is_empty()
            && self.scripts.is_empty()
            && self.codepoints.is_empty()
            && !self.variable
    }
}

/// Options for [`scan`]
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Number of worker threads
    pub jobs: usize,
    pub criteria: ScanCriteria,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            criteria: ScanCriteria::default(),
        }
    }
}

/// Collect all font files from the specified paths
pub fn collect_font_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut font_files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_font_file(path) {
                font_files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                match entry {
                    Ok(entry) => {
                        let entry_path = entry.path();
                        if entry_path.is_file() && is_font_file(entry_path) {
                            font_files.push(entry_path.to_path_buf());
                        }
                    }
                    Err(e) => {
                        warn!("Error walking directory {}: {}", path.display(), e);
                    }
                }
            }
        } else {
            warn!("Path does not exist: {}", path.display());
        }
    }

    font_files.sort();
    font_files
}

/// Query every font file under `paths` in parallel and keep the patterns
/// that pass the criteria
pub fn scan(paths: &[PathBuf], options: &ScanOptions) -> Result<Vec<FontProperties>> {
    let matchers: Vec<Box<dyn FontMatcher>> = matchers::from_criteria(&options.criteria)?;
    let font_files = collect_font_files(paths);
    debug!("scanning {} font files", font_files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| FontscanError::Config(e.to_string()))?;

    let mut results: Vec<FontProperties> = pool.install(|| {
        font_files
            .par_iter()
            .flat_map_iter(|path| match query_all(path) {
                Ok(patterns) => {
                    trace!(
                        "{} ({} bytes): {} patterns",
                        path.display(),
                        get_file_size(path).unwrap_or(0),
                        patterns.len()
                    );
                    patterns
                }
                Err(e) => {
                    warn!("Error loading font {}: {}", path.display(), e);
                    Vec::new()
                }
            })
            .filter(|props| matchers.iter().all(|m| m.matches(props)))
            .collect()
    });

    results.sort_by(|a, b| a.file.cmp(&b.file).then(a.index.cmp(&b.index)));
    Ok(results)
}
