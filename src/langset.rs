// this_file: fontscan/src/langset.rs
//
// Language coverage derived from character coverage

use crate::charset::CharSet;
use serde::Serialize;

/// Characters a language needs: inclusive code-point ranges plus individual
/// letters
#[derive(Debug, Clone, Copy)]
pub struct Orthography {
    pub lang: &'static str,
    pub ranges: &'static [(u32, u32)],
    pub chars: &'static str,
}

const BASIC_LATIN: &[(u32, u32)] = &[(0x41, 0x5A), (0x61, 0x7A)];

const fn latin(lang: &'static str, chars: &'static str) -> Orthography {
    Orthography {
        lang,
        ranges: BASIC_LATIN,
        chars,
    }
}

const fn script(lang: &'static str, ranges: &'static [(u32, u32)]) -> Orthography {
    Orthography {
        lang,
        ranges,
        chars: "",
    }
}

/// Orthographies in tag order
pub static ORTHOGRAPHIES: &[Orthography] = &[
    script("ar", &[(0x0621, 0x063A), (0x0641, 0x064A)]),
    script(
        "bg",
        &[(0x0410, 0x042A), (0x042C, 0x042C), (0x042E, 0x044A), (0x044C, 0x044C), (0x044E, 0x044F)],
    ),
    latin("cs", "ÁČĎÉĚÍŇÓŘŠŤÚŮÝŽáčďéěíňóřšťúůýž"),
    latin("da", "ÅÆØåæø"),
    latin("de", "ÄÖÜäöüß"),
    script("el", &[(0x0391, 0x03A1), (0x03A3, 0x03A9), (0x03B1, 0x03C9)]),
    latin("en", ""),
    latin("es", "ÁÉÍÑÓÚÜáéíñóúü"),
    latin("fi", "ÄÖäö"),
    latin("fr", "ÀÂÇÈÉÊËÎÏÔÙÛÜàâçèéêëîïôùûüÿŒœ"),
    script("he", &[(0x05D0, 0x05EA)]),
    script("hi", &[(0x0905, 0x0914), (0x0915, 0x0939), (0x093E, 0x094D)]),
    latin("hu", "ÁÉÍÓÖŐÚÜŰáéíóöőúüű"),
    script("hy", &[(0x0531, 0x0556), (0x0561, 0x0586)]),
    latin("it", "ÀÈÉÌÒÙàèéìòù"),
    Orthography {
        lang: "ja",
        ranges: &[(0x3041, 0x3093), (0x30A1, 0x30F6)],
        chars: "日本語人大年一中",
    },
    script("ka", &[(0x10D0, 0x10F0)]),
    Orthography {
        lang: "ko",
        ranges: &[(0x3131, 0x318E)],
        chars: "가각간갈감갑강개한국어",
    },
    latin("nl", ""),
    latin("no", "ÅÆØåæø"),
    latin("pl", "ĄĆĘŁŃÓŚŹŻąćęłńóśźż"),
    latin("pt", "ÀÁÂÃÇÉÊÍÓÔÕÚàáâãçéêíóôõú"),
    latin("ro", "ĂÂÎȘȚăâîșț"),
    script("ru", &[(0x0401, 0x0401), (0x0410, 0x044F), (0x0451, 0x0451)]),
    latin("sv", "ÄÅÖäåö"),
    script("th", &[(0x0E01, 0x0E3A), (0x0E40, 0x0E4E)]),
    latin("tr", "ÇĞİÖŞÜçğıöşü"),
    script(
        "uk",
        &[
            (0x0404, 0x0404),
            (0x0406, 0x0407),
            (0x0410, 0x0429),
            (0x042C, 0x042C),
            (0x042E, 0x0449),
            (0x044C, 0x044C),
            (0x044E, 0x044F),
            (0x0454, 0x0454),
            (0x0456, 0x0457),
            (0x0490, 0x0491),
        ],
    ),
    latin("vi", "ĂÂĐÊÔƠƯăâđêôơưẠạẢảẤấẦầẨẩẪẫẬậẮắẰằẲẳẴẵẶặẸẹẺẻẼẽẾếỀềỂểỄễỆệỈỉỊịỌọỎỏỐốỒồỔổỖỗỘộỚớỜờỞởỠỡỢợỤụỦủỨứỪừỬửỮữỰựỲỳỴỵỶỷỸỹ"),
    Orthography {
        lang: "zh-cn",
        ranges: &[],
        chars: "的一是不了人我在有他这为之大来以个中上们国说时",
    },
    Orthography {
        lang: "zh-tw",
        ranges: &[],
        chars: "的一是不了人我在有他這為之大來以個中上們國說時",
    },
];

/// Languages whose fonts usually cover each other's Han characters, so a
/// font advertising one of them should not claim the others
pub const EXCLUSIVE_LANGS: &[&str] = &["ja", "zh-cn", "ko", "zh-tw"];

/// OS/2 code-page bits singling out one CJK language
const CODE_PAGE_LANGS: &[(u32, &str)] = &[(17, "ja"), (18, "zh-cn"), (19, "ko"), (20, "zh-tw")];

/// The one CJK language picked out by the OS/2 code-page ranges, if
/// exactly one is
pub fn exclusive_lang_from_os2(code_page_range_1: u32, code_page_range_2: u32) -> Option<&'static str> {
    let mut exclusive = None;
    for (bit, lang) in CODE_PAGE_LANGS {
        let range = if *bit < 32 {
            code_page_range_1
        } else {
            code_page_range_2
        };
        if range & (1 << (bit & 31)) != 0 {
            if exclusive.is_some() {
                return None;
            }
            exclusive = Some(*lang);
        }
    }
    exclusive
}

impl Orthography {
    pub fn is_covered_by(&self, charset: &CharSet) -> bool {
        charset.covers_ranges(self.ranges)
            && self.chars.chars().all(|c| charset.contains(c as u32))
    }
}

/// Set of supported language tags, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LangSet {
    langs: Vec<&'static str>,
}

impl LangSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Languages whose orthography the charset covers. When `exclusive`
    /// names a CJK language, the other CJK languages are left out.
    pub fn from_charset(charset: &CharSet, exclusive: Option<&str>) -> Self {
        let langs = ORTHOGRAPHIES
            .iter()
            .filter(|orth| match exclusive {
                Some(lang) if EXCLUSIVE_LANGS.contains(&orth.lang) => orth.lang == lang,
                _ => true,
            })
            .filter(|orth| orth.is_covered_by(charset))
            .map(|orth| orth.lang)
            .collect();
        Self { langs }
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.langs.iter().any(|l| l.eq_ignore_ascii_case(lang))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.langs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.langs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.langs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn charset_of(text: &str) -> CharSet {
        text.chars().map(|c| c as u32).collect()
    }

    fn latin1() -> CharSet {
        (0x20..0x7F).chain(0xA0..0x100).collect()
    }

    #[test]
    fn test_orthographies_sorted() {
        let langs: Vec<_> = ORTHOGRAPHIES.iter().map(|o| o.lang).collect();
        let mut sorted = langs.clone();
        sorted.sort_unstable();
        assert_eq!(langs, sorted);
    }

    #[test]
    fn test_latin1_languages() {
        let langs = LangSet::from_charset(&latin1(), None);
        for lang in ["da", "de", "en", "es", "fi", "it", "nl", "no", "pt", "sv"] {
            assert!(langs.contains(lang), "{lang}");
        }
        // Œœ and Ÿ are outside Latin-1
        assert!(!langs.contains("fr"));
        assert!(!langs.contains("pl"));
        assert!(!langs.contains("ru"));
    }

    #[test]
    fn test_cyrillic() {
        let mut charset = latin1();
        for c in 0x0400..0x0500 {
            charset.insert(c);
        }
        let langs = LangSet::from_charset(&charset, None);
        assert!(langs.contains("ru"));
        assert!(langs.contains("uk"));
        assert!(langs.contains("bg"));
    }

    #[test]
    fn test_exclusive_cjk() {
        let mut charset = charset_of(
            "日本語人大年一中的一是不了人我在有他这为之大来以个中上们国说时這為來個們國說時",
        );
        for c in (0x3041..=0x3093).chain(0x30A1..=0x30F6) {
            charset.insert(c);
        }
        let all = LangSet::from_charset(&charset, None);
        assert_eq!(all.iter().collect::<Vec<_>>(), vec!["ja", "zh-cn", "zh-tw"]);

        let japanese = LangSet::from_charset(&charset, Some("ja"));
        assert_eq!(japanese.iter().collect::<Vec<_>>(), vec!["ja"]);
    }

    #[test]
    fn test_exclusive_lang_from_os2() {
        assert_eq!(exclusive_lang_from_os2(1 << 17, 0), Some("ja"));
        assert_eq!(exclusive_lang_from_os2(1 | (1 << 20), 0), Some("zh-tw"));
        assert_eq!(exclusive_lang_from_os2((1 << 17) | (1 << 18), 0), None);
        assert_eq!(exclusive_lang_from_os2(1, 0), None);
    }
}
