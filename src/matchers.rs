// this_file: fontscan/src/matchers.rs
//
// Filters over assembled font properties

use crate::{properties::FontProperties, query::ScanCriteria, Result};
use regex::Regex;

/// Trait for matching fonts
pub trait FontMatcher: Send + Sync {
    /// Check if a font matches the criteria
    fn matches(&self, props: &FontProperties) -> bool;
}

/// Matcher for family and full names
pub struct NameMatcher {
    patterns: Vec<Regex>,
}

impl NameMatcher {
    /// Case-insensitive regular expressions, matched anywhere in a name
    /// unless anchored
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){}", pattern)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl FontMatcher for NameMatcher {
    fn matches(&self, props: &FontProperties) -> bool {
        // each name on its own, so ^ and $ keep their meaning
        self.patterns
            .iter()
            .any(|pattern| props.any_name(|name| pattern.is_match(name)))
    }
}

/// Matcher for supported languages
pub struct LangMatcher {
    langs: Vec<String>,
}

impl LangMatcher {
    pub fn new(langs: &[String]) -> Self {
        Self {
            langs: langs.to_vec(),
        }
    }
}

impl FontMatcher for LangMatcher {
    fn matches(&self, props: &FontProperties) -> bool {
        self.langs.iter().all(|lang| props.langs.contains(lang))
    }
}

/// Matcher for OpenType scripts
pub struct ScriptsMatcher {
    wanted_scripts: Vec<String>,
}

impl ScriptsMatcher {
    pub fn new(scripts: &[String]) -> Self {
        Self {
            wanted_scripts: scripts.to_vec(),
        }
    }
}

impl FontMatcher for ScriptsMatcher {
    fn matches(&self, props: &FontProperties) -> bool {
        self.wanted_scripts
            .iter()
            .all(|wanted| props.scripts().any(|script| script == wanted))
    }
}

/// Matcher for Unicode codepoints
pub struct CodepointsMatcher {
    codepoints: Vec<char>,
}

impl CodepointsMatcher {
    pub fn new(codepoints: &[char]) -> Self {
        Self {
            codepoints: codepoints.to_vec(),
        }
    }
}

impl FontMatcher for CodepointsMatcher {
    fn matches(&self, props: &FontProperties) -> bool {
        self.codepoints
            .iter()
            .all(|c| props.charset.contains(*c as u32))
    }
}

/// Matcher for variable patterns and their named instances
pub struct VariableFontMatcher;

impl FontMatcher for VariableFontMatcher {
    fn matches(&self, props: &FontProperties) -> bool {
        props.variable || props.named_instance
    }
}

/// One matcher per non-empty criterion
pub fn from_criteria(criteria: &ScanCriteria) -> Result<Vec<Box<dyn FontMatcher>>> {
    let mut matchers: Vec<Box<dyn FontMatcher>> = Vec::new();
    if !criteria.name_patterns.is_empty() {
        matchers.push(Box::new(NameMatcher::new(&criteria.name_patterns)?));
    }
    if !criteria.langs.is_empty() {
        matchers.push(Box::new(LangMatcher::new(&criteria.langs)));
    }
    if !criteria.scripts.is_empty() {
        matchers.push(Box::new(ScriptsMatcher::new(&criteria.scripts)));
    }
    if !criteria.codepoints.is_empty() {
        matchers.push(Box::new(CodepointsMatcher::new(&criteria.codepoints)));
    }
    if criteria.variable {
        matchers.push(Box::new(VariableFontMatcher));
    }
    Ok(matchers)
}
