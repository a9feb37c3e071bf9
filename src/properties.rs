// this_file: fontscan/src/properties.rs
//
// The property set produced for one face or instance, and its builder

use crate::{
    charset::{CharSet, Spacing},
    langset::LangSet,
    names::{LocalizedName, NameDefaults, SelectedNames},
    style::{ResolvedStyle, Slant},
};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};

/// A numeric property: one value, or the span covered by a variation axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Single(f64),
    Range { min: f64, max: f64 },
}

impl PropertyValue {
    /// A range, collapsed to a single value when both ends agree
    pub fn range(min: f64, max: f64) -> Self {
        if min == max {
            PropertyValue::Single(min)
        } else {
            PropertyValue::Range { min, max }
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, PropertyValue::Range { .. })
    }

    /// Whether `value` is this value or falls inside this range
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            PropertyValue::Single(v) => v == value,
            PropertyValue::Range { min, max } => (min..=max).contains(&value),
        }
    }
}

/// Everything known about one face, or one instance of a variable face
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontProperties {
    pub family: Vec<LocalizedName>,
    pub style: Vec<LocalizedName>,
    pub full_name: Vec<LocalizedName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_name: Option<String>,
    pub foundry: String,

    pub weight: PropertyValue,
    pub width: PropertyValue,
    pub slant: Slant,
    /// Only present for non-proportional faces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    pub decorative: bool,

    /// The axis-range pattern of a variable face
    pub variable: bool,
    pub variable_weight: bool,
    pub variable_width: bool,
    pub variable_size: bool,
    /// Optical size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<PropertyValue>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pixel_sizes: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antialias: Option<bool>,
    pub outline: bool,
    pub scalable: bool,
    pub color: bool,
    pub symbol: bool,
    pub named_instance: bool,

    pub charset: Arc<CharSet>,
    pub langs: Arc<LangSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_wrapper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    pub font_has_hint: bool,
    /// `head.fontRevision`, 16.16 fixed point
    pub font_version: i32,
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl FontProperties {
    pub fn family_langs(&self) -> impl Iterator<Item = &str> {
        self.family.iter().map(|name| name.lang.as_str())
    }

    pub fn style_langs(&self) -> impl Iterator<Item = &str> {
        self.style.iter().map(|name| name.lang.as_str())
    }

    pub fn full_name_langs(&self) -> impl Iterator<Item = &str> {
        self.full_name.iter().map(|name| name.lang.as_str())
    }

    /// The preferred family name
    pub fn primary_family(&self) -> Option<&str> {
        self.family.first().map(|name| name.value.as_str())
    }

    /// Whether a family name or full name matches `pred`
    pub fn any_name(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
        self.family
            .iter()
            .chain(&self.full_name)
            .any(|name| pred(&name.value))
    }

    /// Every `otlayout:` script tag in the capability string
    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        self.capability
            .as_deref()
            .unwrap_or_default()
            .split(' ')
            .filter_map(|part| part.strip_prefix("otlayout:"))
    }
}

/// Accumulates the properties of one query.
///
/// A query that fails part-way simply drops its builder; only
/// [`FontPropertiesBuilder::build`] hands out a `FontProperties`.
#[derive(Debug)]
pub struct FontPropertiesBuilder {
    names: SelectedNames,
    postscript_name: Option<String>,
    foundry: Option<String>,
    style: Option<ResolvedStyle>,
    weight_range: Option<(f64, f64)>,
    width_range: Option<(f64, f64)>,
    size: Option<PropertyValue>,
    variable: bool,
    spacing: Spacing,
    pixel_sizes: Vec<f64>,
    antialias: Option<bool>,
    outline: bool,
    color: bool,
    symbol: bool,
    named_instance: bool,
    charset: Arc<CharSet>,
    langs: Arc<LangSet>,
    font_format: Option<String>,
    font_wrapper: Option<String>,
    capability: Option<String>,
    font_has_hint: bool,
    font_version: i32,
    index: u32,
    file: Option<PathBuf>,
}

impl FontPropertiesBuilder {
    pub fn new(index: u32) -> Self {
        Self {
            names: SelectedNames::default(),
            postscript_name: None,
            foundry: None,
            style: None,
            weight_range: None,
            width_range: None,
            size: None,
            variable: false,
            spacing: Spacing::Proportional,
            pixel_sizes: Vec::new(),
            antialias: None,
            outline: false,
            color: false,
            symbol: false,
            named_instance: false,
            charset: Arc::default(),
            langs: Arc::default(),
            font_format: None,
            font_wrapper: None,
            capability: None,
            font_has_hint: false,
            font_version: 0,
            index,
            file: None,
        }
    }

    pub fn names(&mut self, names: SelectedNames) -> &mut Self {
        self.names = names;
        self
    }

    pub fn selected_names(&self) -> &SelectedNames {
        &self.names
    }

    /// Fill empty name fields from the face defaults
    pub fn name_fallbacks(&mut self, defaults: NameDefaults<'_>) -> &mut Self {
        self.names.apply_fallbacks(defaults, self.variable);
        self
    }

    pub fn postscript_name(&mut self, name: Option<String>) -> &mut Self {
        self.postscript_name = name;
        self
    }

    pub fn foundry(&mut self, foundry: impl Into<String>) -> &mut Self {
        self.foundry = Some(foundry.into());
        self
    }

    pub fn style(&mut self, style: ResolvedStyle) -> &mut Self {
        self.style = Some(style);
        self
    }

    /// Mark this as the variable pattern
    pub fn variable(&mut self, variable: bool) -> &mut Self {
        self.variable = variable;
        self
    }

    pub fn weight_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.weight_range = Some((min, max));
        self
    }

    pub fn width_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.width_range = Some((min, max));
        self
    }

    pub fn size(&mut self, size: PropertyValue) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn has_size(&self) -> bool {
        self.size.is_some()
    }

    pub fn spacing(&mut self, spacing: Spacing) -> &mut Self {
        self.spacing = spacing;
        self
    }

    pub fn pixel_sizes(&mut self, sizes: Vec<f64>) -> &mut Self {
        self.pixel_sizes = sizes;
        self
    }

    pub fn antialias(&mut self, antialias: bool) -> &mut Self {
        self.antialias = Some(antialias);
        self
    }

    pub fn outline(&mut self, outline: bool, color: bool) -> &mut Self {
        self.outline = outline;
        self.color = color;
        self
    }

    pub fn symbol(&mut self, symbol: bool) -> &mut Self {
        self.symbol = symbol;
        self
    }

    pub fn named_instance(&mut self, named_instance: bool) -> &mut Self {
        self.named_instance = named_instance;
        self
    }

    pub fn coverage(&mut self, charset: Arc<CharSet>, langs: Arc<LangSet>) -> &mut Self {
        self.charset = charset;
        self.langs = langs;
        self
    }

    pub fn format(&mut self, format: Option<String>, wrapper: Option<String>) -> &mut Self {
        self.font_format = format;
        self.font_wrapper = wrapper;
        self
    }

    pub fn capability(&mut self, capability: Option<String>, has_hint: bool) -> &mut Self {
        self.capability = capability;
        self.font_has_hint = has_hint;
        self
    }

    pub fn font_version(&mut self, version: i32) -> &mut Self {
        self.font_version = version;
        self
    }

    pub fn file(&mut self, file: Option<PathBuf>) -> &mut Self {
        self.file = file;
        self
    }

    pub fn build(self) -> FontProperties {
        let style = self.style.unwrap_or(ResolvedStyle {
            weight: crate::style::WEIGHT_MEDIUM,
            width: crate::style::WIDTH_NORMAL,
            slant: Slant::Roman,
            decorative: false,
        });
        let weight = match self.weight_range {
            Some((min, max)) => PropertyValue::Range { min, max },
            None => PropertyValue::Single(style.weight),
        };
        let width = match self.width_range {
            Some((min, max)) => PropertyValue::Range { min, max },
            None => PropertyValue::Single(style.width),
        };
        let variable_size = self.variable && self.size.is_some_and(|size| size.is_range());

        FontProperties {
            family: self.names.families,
            style: self.names.styles,
            full_name: self.names.full_names,
            postscript_name: self.postscript_name,
            foundry: self.foundry.unwrap_or_else(|| "unknown".to_string()),
            weight,
            width,
            slant: style.slant,
            spacing: (self.spacing != Spacing::Proportional).then_some(self.spacing),
            decorative: style.decorative,
            variable: self.variable,
            variable_weight: self.weight_range.is_some(),
            variable_width: self.width_range.is_some(),
            variable_size,
            size: self.size,
            pixel_sizes: self.pixel_sizes,
            antialias: self.antialias,
            outline: self.outline,
            scalable: self.outline || self.color,
            color: self.color,
            symbol: self.symbol,
            named_instance: self.named_instance,
            charset: self.charset,
            langs: self.langs,
            font_format: self.font_format,
            font_wrapper: self.font_wrapper,
            capability: self.capability,
            font_has_hint: self.font_has_hint,
            font_version: self.font_version,
            index: self.index,
            file: self.file,
        }
    }
}
