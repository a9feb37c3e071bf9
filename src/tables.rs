// this_file: fontscan/src/tables.rs
//
// Static name-table lookup data: platform/encoding/language registries,
// the Mac Roman repair table and the notice-to-foundry table.
//
// Table order is significant everywhere in this file: lookups are linear
// and the first matching entry wins.

/// Unicode platform
pub const PLATFORM_UNICODE: u16 = 0;
/// Macintosh platform
pub const PLATFORM_MACINTOSH: u16 = 1;
/// ISO platform (deprecated)
pub const PLATFORM_ISO: u16 = 2;
/// Microsoft platform
pub const PLATFORM_MICROSOFT: u16 = 3;

pub const MAC_ENCODING_ROMAN: u16 = 0;
pub const MAC_ENCODING_JAPANESE: u16 = 1;

pub const MAC_LANGUAGE_ENGLISH: u16 = 0;
pub const MAC_LANGUAGE_JAPANESE: u16 = 11;

pub const MS_LANGUAGE_ENGLISH_US: u16 = 0x0409;
pub const MS_LANGUAGE_JAPANESE: u16 = 0x0411;

pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_SUBFAMILY: u16 = 2;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_POSTSCRIPT_NAME: u16 = 6;
pub const NAME_ID_TRADEMARK: u16 = 7;
pub const NAME_ID_MANUFACTURER: u16 = 8;
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;
pub const NAME_ID_TYPOGRAPHIC_SUBFAMILY: u16 = 17;
pub const NAME_ID_MAC_FULL_NAME: u16 = 18;
pub const NAME_ID_WWS_FAMILY: u16 = 21;
pub const NAME_ID_WWS_SUBFAMILY: u16 = 22;
pub const NAME_ID_VARIATIONS_PS_PREFIX: u16 = 25;

/// Platforms in the order their names are preferred.
pub const PLATFORM_ORDER: [u16; 4] = [
    PLATFORM_MICROSOFT,
    PLATFORM_UNICODE,
    PLATFORM_MACINTOSH,
    PLATFORM_ISO,
];

/// Name ids in the order their values are appended to the output.
pub const NAME_ID_ORDER: [u16; 10] = [
    NAME_ID_WWS_FAMILY,
    NAME_ID_TYPOGRAPHIC_FAMILY,
    NAME_ID_FAMILY,
    NAME_ID_MAC_FULL_NAME,
    NAME_ID_FULL_NAME,
    NAME_ID_WWS_SUBFAMILY,
    NAME_ID_TYPOGRAPHIC_SUBFAMILY,
    NAME_ID_SUBFAMILY,
    NAME_ID_TRADEMARK,
    NAME_ID_MANUFACTURER,
];

/// Source charset of a name record's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf16Be,
    MacRoman,
    ShiftJis,
    ShiftJisWindows,
    Gb18030,
    Big5,
    Wansung,
    Johab,
    Ascii,
    Latin1,
}

impl Charset {
    /// Canonical charset name, as used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf16Be => "UTF-16BE",
            Charset::MacRoman => "MACINTOSH",
            Charset::ShiftJis => "SJIS",
            Charset::ShiftJisWindows => "SJIS-WIN",
            Charset::Gb18030 => "GB18030",
            Charset::Big5 => "BIG-5",
            Charset::Wansung => "Wansung",
            Charset::Johab => "Johab",
            Charset::Ascii => "ASCII",
            Charset::Latin1 => "ISO-8859-1",
        }
    }
}

/// Maps a (platform, encoding) pair to the charset its names are stored in
#[derive(Debug, Clone, Copy)]
pub struct EncodingRule {
    pub platform_id: u16,
    /// `None` matches any encoding id
    pub encoding_id: Option<u16>,
    pub charset: Charset,
}

impl EncodingRule {
    const fn new(platform_id: u16, encoding_id: u16, charset: Charset) -> Self {
        Self {
            platform_id,
            encoding_id: Some(encoding_id),
            charset,
        }
    }

    const fn any(platform_id: u16, charset: Charset) -> Self {
        Self {
            platform_id,
            encoding_id: None,
            charset,
        }
    }

    fn matches(&self, platform_id: u16, encoding_id: u16) -> bool {
        self.platform_id == platform_id && self.encoding_id.map_or(true, |e| e == encoding_id)
    }
}

pub static ENCODING_RULES: &[EncodingRule] = &[
    EncodingRule::any(PLATFORM_UNICODE, Charset::Utf16Be),
    EncodingRule::new(PLATFORM_MACINTOSH, MAC_ENCODING_ROMAN, Charset::MacRoman),
    EncodingRule::new(PLATFORM_MACINTOSH, MAC_ENCODING_JAPANESE, Charset::ShiftJis),
    EncodingRule::new(PLATFORM_MICROSOFT, 0, Charset::Utf16Be), // symbol
    EncodingRule::new(PLATFORM_MICROSOFT, 1, Charset::Utf16Be), // unicode bmp
    EncodingRule::new(PLATFORM_MICROSOFT, 2, Charset::ShiftJisWindows),
    EncodingRule::new(PLATFORM_MICROSOFT, 3, Charset::Gb18030),
    EncodingRule::new(PLATFORM_MICROSOFT, 4, Charset::Big5),
    EncodingRule::new(PLATFORM_MICROSOFT, 5, Charset::Wansung),
    EncodingRule::new(PLATFORM_MICROSOFT, 6, Charset::Johab),
    EncodingRule::new(PLATFORM_MICROSOFT, 10, Charset::Utf16Be), // ucs-4
    EncodingRule::new(PLATFORM_ISO, 0, Charset::Ascii),
    EncodingRule::new(PLATFORM_ISO, 1, Charset::Utf16Be),
    EncodingRule::new(PLATFORM_ISO, 2, Charset::Latin1),
];

/// Resolve the charset of a name record from its platform and encoding ids
pub fn resolve_encoding(platform_id: u16, encoding_id: u16) -> Option<Charset> {
    ENCODING_RULES
        .iter()
        .find(|rule| rule.matches(platform_id, encoding_id))
        .map(|rule| rule.charset)
}

/// Result of a language-table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// The record's language maps to this tag
    Tag(&'static str),
    /// The record is recognized but deliberately carries no tag
    Untagged,
}

/// Maps a (platform, language) pair to a language tag
#[derive(Debug, Clone, Copy)]
pub struct LanguageRule {
    pub platform_id: u16,
    /// `None` matches any language id
    pub language_id: Option<u16>,
    /// Empty means "recognized, no tag"
    pub tag: &'static str,
}

impl LanguageRule {
    const fn new(platform_id: u16, language_id: u16, tag: &'static str) -> Self {
        Self {
            platform_id,
            language_id: Some(language_id),
            tag,
        }
    }

    const fn any(platform_id: u16, tag: &'static str) -> Self {
        Self {
            platform_id,
            language_id: None,
            tag,
        }
    }

    fn matches(&self, platform_id: u16, language_id: u16) -> bool {
        self.platform_id == platform_id && self.language_id.map_or(true, |l| l == language_id)
    }
}

pub static LANGUAGE_RULES: &[LanguageRule] = &[
    LanguageRule::any(PLATFORM_UNICODE, ""),
    LanguageRule::new(PLATFORM_MACINTOSH, 0, "en"),
    LanguageRule::new(PLATFORM_MACINTOSH, 1, "fr"),
    LanguageRule::new(PLATFORM_MACINTOSH, 2, "de"),
    LanguageRule::new(PLATFORM_MACINTOSH, 3, "it"),
    LanguageRule::new(PLATFORM_MACINTOSH, 4, "nl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 5, "sv"),
    LanguageRule::new(PLATFORM_MACINTOSH, 6, "es"),
    LanguageRule::new(PLATFORM_MACINTOSH, 7, "da"),
    LanguageRule::new(PLATFORM_MACINTOSH, 8, "pt"),
    LanguageRule::new(PLATFORM_MACINTOSH, 9, "no"),
    LanguageRule::new(PLATFORM_MACINTOSH, 10, "he"),
    LanguageRule::new(PLATFORM_MACINTOSH, 11, "ja"),
    LanguageRule::new(PLATFORM_MACINTOSH, 12, "ar"),
    LanguageRule::new(PLATFORM_MACINTOSH, 13, "fi"),
    LanguageRule::new(PLATFORM_MACINTOSH, 14, "el"),
    LanguageRule::new(PLATFORM_MACINTOSH, 15, "is"),
    LanguageRule::new(PLATFORM_MACINTOSH, 16, "mt"),
    LanguageRule::new(PLATFORM_MACINTOSH, 17, "tr"),
    LanguageRule::new(PLATFORM_MACINTOSH, 18, "hr"),
    LanguageRule::new(PLATFORM_MACINTOSH, 19, "zh-tw"),
    LanguageRule::new(PLATFORM_MACINTOSH, 20, "ur"),
    LanguageRule::new(PLATFORM_MACINTOSH, 21, "hi"),
    LanguageRule::new(PLATFORM_MACINTOSH, 22, "th"),
    LanguageRule::new(PLATFORM_MACINTOSH, 23, "ko"),
    LanguageRule::new(PLATFORM_MACINTOSH, 24, "lt"),
    LanguageRule::new(PLATFORM_MACINTOSH, 25, "pl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 26, "hu"),
    LanguageRule::new(PLATFORM_MACINTOSH, 27, "et"),
    LanguageRule::new(PLATFORM_MACINTOSH, 28, "lv"),
    LanguageRule::new(PLATFORM_MACINTOSH, 30, "fo"),
    LanguageRule::new(PLATFORM_MACINTOSH, 31, "fa"),
    LanguageRule::new(PLATFORM_MACINTOSH, 32, "ru"),
    LanguageRule::new(PLATFORM_MACINTOSH, 33, "zh-cn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 34, "nl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 35, "ga"),
    LanguageRule::new(PLATFORM_MACINTOSH, 36, "sq"),
    LanguageRule::new(PLATFORM_MACINTOSH, 37, "ro"),
    LanguageRule::new(PLATFORM_MACINTOSH, 38, "cs"),
    LanguageRule::new(PLATFORM_MACINTOSH, 39, "sk"),
    LanguageRule::new(PLATFORM_MACINTOSH, 40, "sl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 41, "yi"),
    LanguageRule::new(PLATFORM_MACINTOSH, 42, "sr"),
    LanguageRule::new(PLATFORM_MACINTOSH, 43, "mk"),
    LanguageRule::new(PLATFORM_MACINTOSH, 44, "bg"),
    LanguageRule::new(PLATFORM_MACINTOSH, 45, "uk"),
    LanguageRule::new(PLATFORM_MACINTOSH, 46, "be"),
    LanguageRule::new(PLATFORM_MACINTOSH, 47, "uz"),
    LanguageRule::new(PLATFORM_MACINTOSH, 48, "kk"),
    LanguageRule::new(PLATFORM_MACINTOSH, 49, "az"),
    LanguageRule::new(PLATFORM_MACINTOSH, 49, "az"),
    LanguageRule::new(PLATFORM_MACINTOSH, 50, "ar"),
    LanguageRule::new(PLATFORM_MACINTOSH, 51, "hy"),
    LanguageRule::new(PLATFORM_MACINTOSH, 52, "ka"),
    LanguageRule::new(PLATFORM_MACINTOSH, 53, "mo"),
    LanguageRule::new(PLATFORM_MACINTOSH, 54, "ky"),
    LanguageRule::new(PLATFORM_MACINTOSH, 55, "tg"),
    LanguageRule::new(PLATFORM_MACINTOSH, 56, "tk"),
    LanguageRule::new(PLATFORM_MACINTOSH, 57, "mn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 57, "mn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 58, "mn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 59, "ps"),
    LanguageRule::new(PLATFORM_MACINTOSH, 60, "ku"),
    LanguageRule::new(PLATFORM_MACINTOSH, 61, "ks"),
    LanguageRule::new(PLATFORM_MACINTOSH, 62, "sd"),
    LanguageRule::new(PLATFORM_MACINTOSH, 63, "bo"),
    LanguageRule::new(PLATFORM_MACINTOSH, 64, "ne"),
    LanguageRule::new(PLATFORM_MACINTOSH, 65, "sa"),
    LanguageRule::new(PLATFORM_MACINTOSH, 66, "mr"),
    LanguageRule::new(PLATFORM_MACINTOSH, 67, "bn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 68, "as"),
    LanguageRule::new(PLATFORM_MACINTOSH, 69, "gu"),
    LanguageRule::new(PLATFORM_MACINTOSH, 70, "pa"),
    LanguageRule::new(PLATFORM_MACINTOSH, 71, "or"),
    LanguageRule::new(PLATFORM_MACINTOSH, 72, "ml"),
    LanguageRule::new(PLATFORM_MACINTOSH, 73, "kn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 74, "ta"),
    LanguageRule::new(PLATFORM_MACINTOSH, 75, "te"),
    LanguageRule::new(PLATFORM_MACINTOSH, 76, "si"),
    LanguageRule::new(PLATFORM_MACINTOSH, 77, "my"),
    LanguageRule::new(PLATFORM_MACINTOSH, 78, "km"),
    LanguageRule::new(PLATFORM_MACINTOSH, 79, "lo"),
    LanguageRule::new(PLATFORM_MACINTOSH, 80, "vi"),
    LanguageRule::new(PLATFORM_MACINTOSH, 81, "id"),
    LanguageRule::new(PLATFORM_MACINTOSH, 82, "tl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 83, "ms"),
    LanguageRule::new(PLATFORM_MACINTOSH, 84, "ms"),
    LanguageRule::new(PLATFORM_MACINTOSH, 85, "am"),
    LanguageRule::new(PLATFORM_MACINTOSH, 86, "ti"),
    LanguageRule::new(PLATFORM_MACINTOSH, 87, "om"),
    LanguageRule::new(PLATFORM_MACINTOSH, 88, "so"),
    LanguageRule::new(PLATFORM_MACINTOSH, 89, "sw"),
    LanguageRule::new(PLATFORM_MACINTOSH, 90, "rw"),
    LanguageRule::new(PLATFORM_MACINTOSH, 91, "rn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 92, "ny"),
    LanguageRule::new(PLATFORM_MACINTOSH, 93, "mg"),
    LanguageRule::new(PLATFORM_MACINTOSH, 94, "eo"),
    LanguageRule::new(PLATFORM_MACINTOSH, 128, "cy"),
    LanguageRule::new(PLATFORM_MACINTOSH, 129, "eu"),
    LanguageRule::new(PLATFORM_MACINTOSH, 130, "ca"),
    LanguageRule::new(PLATFORM_MACINTOSH, 131, "la"),
    LanguageRule::new(PLATFORM_MACINTOSH, 132, "qu"),
    LanguageRule::new(PLATFORM_MACINTOSH, 133, "gn"),
    LanguageRule::new(PLATFORM_MACINTOSH, 134, "ay"),
    LanguageRule::new(PLATFORM_MACINTOSH, 135, "tt"),
    LanguageRule::new(PLATFORM_MACINTOSH, 136, "ug"),
    LanguageRule::new(PLATFORM_MACINTOSH, 137, "dz"),
    LanguageRule::new(PLATFORM_MACINTOSH, 138, "jw"),
    LanguageRule::new(PLATFORM_MACINTOSH, 139, "su"),
    LanguageRule::new(PLATFORM_MACINTOSH, 140, "gl"),
    LanguageRule::new(PLATFORM_MACINTOSH, 141, "af"),
    LanguageRule::new(PLATFORM_MACINTOSH, 142, "br"),
    LanguageRule::new(PLATFORM_MACINTOSH, 143, "iu"),
    LanguageRule::new(PLATFORM_MACINTOSH, 144, "gd"),
    LanguageRule::new(PLATFORM_MACINTOSH, 145, "gv"),
    LanguageRule::new(PLATFORM_MACINTOSH, 146, "ga"),
    LanguageRule::new(PLATFORM_MACINTOSH, 147, "to"),
    LanguageRule::new(PLATFORM_MACINTOSH, 148, "el"),
    LanguageRule::new(PLATFORM_MACINTOSH, 149, "ik"),
    LanguageRule::new(PLATFORM_MACINTOSH, 150, "az"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0401, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0801, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C01, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1001, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1401, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1801, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1C01, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2001, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2401, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2801, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2C01, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3001, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3401, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3801, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3C01, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x4001, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0402, "bg"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0403, "ca"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0404, "zh-tw"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0804, "zh-cn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C04, "zh-hk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1004, "zh-sg"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1404, "zh-mo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0405, "cs"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0406, "da"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0407, "de"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0807, "de"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C07, "de"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1007, "de"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1407, "de"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0408, "el"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0409, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0809, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C09, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1009, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1409, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1809, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1C09, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2009, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2409, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2809, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2C09, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3009, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3409, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x080A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C0A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x100A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x140A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x180A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1C0A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x200A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x240A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x280A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2C0A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x300A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x340A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x380A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3C0A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x400A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x440A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x480A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x4C0A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x500A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040B, "fi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x080C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C0C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x100C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x140C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x180C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040D, "he"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040E, "hu"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x040F, "is"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0410, "it"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0810, "it"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0411, "ja"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0412, "ko"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0812, "ko"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0413, "nl"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0813, "nl"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0414, "no"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0814, "nn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0415, "pl"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0416, "pt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0816, "pt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0417, "rm"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0418, "ro"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0818, "mo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0419, "ru"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0819, "ru"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041A, "hr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x081A, "sr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0C1A, "sr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041B, "sk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041C, "sq"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041D, "sv"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x081D, "sv"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041E, "th"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x041F, "tr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0420, "ur"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0421, "id"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0422, "uk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0423, "be"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0424, "sl"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0425, "et"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0426, "lv"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0427, "lt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0827, "lt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0481, "mi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0429, "fa"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042A, "vi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042B, "hy"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042C, "az"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x082C, "az"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042D, "eu"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042E, "wen"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x042F, "mk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0430, "st"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0431, "ts"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0432, "tn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0433, "ven"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0434, "xh"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0435, "zu"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0436, "af"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0437, "ka"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0438, "fo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0439, "hi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043A, "mt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043B, "se"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x083C, "gd"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043C, "ga"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043E, "ms"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x083E, "ms"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043F, "kk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0441, "sw"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0443, "uz"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0843, "uz"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0444, "tt"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0445, "bn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0446, "pa"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0447, "gu"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0448, "or"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0449, "ta"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044A, "te"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044B, "kn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044C, "ml"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044D, "as"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044E, "mr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x044F, "sa"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0457, "kok"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0001, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0004, "zh"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0009, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x1C0C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x200C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x240C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x280C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x2C0C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x300C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x340C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x141A, "bs"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0820, "ur"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0428, "tg"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x043D, "yi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0440, "ky"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0442, "tk"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0450, "mn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0851, "bo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0451, "bo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0851, "dz"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0452, "cy"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0453, "km"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0454, "lo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0455, "my"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0456, "gl"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0458, "mni"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0459, "sd"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0460, "ks"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0860, "ks"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0461, "ne"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0861, "ne"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0462, "fy"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3C09, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x4009, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x4409, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x4809, "en"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x045A, "syr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x045B, "si"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x045C, "chr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x045D, "iu"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x045E, "am"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0463, "ps"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0464, "phi"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0465, "div"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0472, "om"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0473, "ti"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0873, "ti"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x540A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0xE40A, "es"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0xE40C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x380C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x3C0C, "fr"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0845, "bn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0846, "ar"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0850, "mn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0468, "ha"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x046A, "yo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0470, "ibo"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0471, "kau"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0474, "gn"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0475, "haw"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0476, "la"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0477, "so"),
    LanguageRule::new(PLATFORM_MICROSOFT, 0x0479, "pap"),
];

/// Resolve the language tag of a name record.
///
/// Returns `None` when no rule matches at all, which callers must keep
/// distinct from [`Language::Untagged`].
pub fn resolve_language(platform_id: u16, language_id: u16) -> Option<Language> {
    LANGUAGE_RULES
        .iter()
        .find(|rule| rule.matches(platform_id, language_id))
        .map(|rule| {
            if rule.tag.is_empty() {
                Language::Untagged
            } else {
                Language::Tag(rule.tag)
            }
        })
}

/// Whether a (platform, language) pair denotes English for name ordering
pub fn is_english(platform_id: u16, language_id: u16) -> bool {
    match platform_id {
        PLATFORM_MACINTOSH => language_id == MAC_LANGUAGE_ENGLISH,
        PLATFORM_MICROSOFT => language_id == MS_LANGUAGE_ENGLISH_US,
        _ => false,
    }
}

/// Macintosh records whose language id is really a Microsoft LCID.
static MAC_ROMAN_FAKE: &[(u16, Charset)] = &[
    (MS_LANGUAGE_JAPANESE, Charset::ShiftJisWindows),
    (MS_LANGUAGE_ENGLISH_US, Charset::Ascii),
];

/// Charset for a Mac Roman record carrying an out-of-range language id
pub fn mac_roman_fake(language_id: u16) -> Option<Charset> {
    MAC_ROMAN_FAKE
        .iter()
        .find(|(id, _)| *id == language_id)
        .map(|(_, charset)| *charset)
}

/// Unicode values of Mac Roman bytes 0x80..=0xFF
pub static MAC_ROMAN_HIGH: [char; 128] = [
    '\u{00C4}', '\u{00C5}', '\u{00C7}', '\u{00C9}', '\u{00D1}', '\u{00D6}', '\u{00DC}', '\u{00E1}',
    '\u{00E0}', '\u{00E2}', '\u{00E4}', '\u{00E3}', '\u{00E5}', '\u{00E7}', '\u{00E9}', '\u{00E8}',
    '\u{00EA}', '\u{00EB}', '\u{00ED}', '\u{00EC}', '\u{00EE}', '\u{00EF}', '\u{00F1}', '\u{00F3}',
    '\u{00F2}', '\u{00F4}', '\u{00F6}', '\u{00F5}', '\u{00FA}', '\u{00F9}', '\u{00FB}', '\u{00FC}',
    '\u{2020}', '\u{00B0}', '\u{00A2}', '\u{00A3}', '\u{00A7}', '\u{2022}', '\u{00B6}', '\u{00DF}',
    '\u{00AE}', '\u{00A9}', '\u{2122}', '\u{00B4}', '\u{00A8}', '\u{2260}', '\u{00C6}', '\u{00D8}',
    '\u{221E}', '\u{00B1}', '\u{2264}', '\u{2265}', '\u{00A5}', '\u{00B5}', '\u{2202}', '\u{2211}',
    '\u{220F}', '\u{03C0}', '\u{222B}', '\u{00AA}', '\u{00BA}', '\u{03A9}', '\u{00E6}', '\u{00F8}',
    '\u{00BF}', '\u{00A1}', '\u{00AC}', '\u{221A}', '\u{0192}', '\u{2248}', '\u{2206}', '\u{00AB}',
    '\u{00BB}', '\u{2026}', '\u{00A0}', '\u{00C0}', '\u{00C3}', '\u{00D5}', '\u{0152}', '\u{0153}',
    '\u{2013}', '\u{2014}', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00F7}', '\u{25CA}',
    '\u{00FF}', '\u{0178}', '\u{2044}', '\u{20AC}', '\u{2039}', '\u{203A}', '\u{FB01}', '\u{FB02}',
    '\u{2021}', '\u{00B7}', '\u{201A}', '\u{201E}', '\u{2030}', '\u{00C2}', '\u{00CA}', '\u{00C1}',
    '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}', '\u{00CC}', '\u{00D3}', '\u{00D4}',
    '\u{F8FF}', '\u{00D2}', '\u{00DA}', '\u{00DB}', '\u{00D9}', '\u{0131}', '\u{02C6}', '\u{02DC}',
    '\u{00AF}', '\u{02D8}', '\u{02D9}', '\u{02DA}', '\u{00B8}', '\u{02DD}', '\u{02DB}', '\u{02C7}',
];

/// Map one Mac Roman byte to its Unicode character
#[inline]
pub fn mac_roman_char(byte: u8) -> char {
    if byte < 0x80 {
        byte as char
    } else {
        MAC_ROMAN_HIGH[(byte - 0x80) as usize]
    }
}

/// Copyright/trademark substrings identifying a foundry
pub static NOTICE_FOUNDRIES: &[(&str, &str)] = &[
    ("Adobe", "adobe"),
    ("Bigelow", "b&h"),
    ("Bitstream", "bitstream"),
    ("Gnat", "culmus"),
    ("Iorsh", "culmus"),
    ("HanYang System", "hanyang"),
    ("Font21", "hwan"),
    ("IBM", "ibm"),
    ("International Typeface Corporation", "itc"),
    ("Linotype", "linotype"),
    ("LINOTYPE-HELL", "linotype"),
    ("Microsoft", "microsoft"),
    ("Monotype", "monotype"),
    ("Omega", "omega"),
    ("Tiro Typeworks", "tiro"),
    ("URW", "urw"),
    ("XFree86", "xfree86"),
    ("Xorg", "xorg"),
];

/// Find the foundry named in a notice string
pub fn notice_foundry(notice: &str) -> Option<&'static str> {
    NOTICE_FOUNDRIES
        .iter()
        .find(|(needle, _)| notice.contains(needle))
        .map(|(_, foundry)| *foundry)
}
