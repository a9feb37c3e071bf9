// this_file: fontscan/src/transcode.rs
//
// Name record to UTF-8 transcoding

use crate::{
    face::NameRecord,
    tables::{
        self, Charset, Language, MAC_ENCODING_ROMAN, MAC_LANGUAGE_ENGLISH, MAC_LANGUAGE_JAPANESE,
        PLATFORM_MACINTOSH,
    },
    FontscanError, Result,
};
use encoding_rs::Encoding;

/// Converts bytes in a legacy charset to UTF-8.
///
/// Only consulted for charsets without a built-in fast path.
pub trait CharsetConverter: Send + Sync {
    fn convert(&self, charset: Charset, bytes: &[u8]) -> Result<String>;
}

/// [`CharsetConverter`] backed by `encoding_rs`
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingRsConverter;

impl EncodingRsConverter {
    fn encoding(charset: Charset) -> Option<&'static Encoding> {
        let label: &[u8] = match charset {
            Charset::ShiftJis | Charset::ShiftJisWindows => b"shift_jis",
            Charset::Gb18030 => b"gb18030",
            Charset::Big5 => b"big5",
            Charset::Wansung => b"euc-kr",
            Charset::Utf16Be => b"utf-16be",
            Charset::MacRoman => b"macintosh",
            Charset::Ascii | Charset::Latin1 => b"iso-8859-1",
            Charset::Johab => return None,
        };
        Encoding::for_label(label)
    }
}

impl CharsetConverter for EncodingRsConverter {
    fn convert(&self, charset: Charset, bytes: &[u8]) -> Result<String> {
        if charset == Charset::Johab {
            return decode_johab(bytes);
        }
        let encoding = Self::encoding(charset).ok_or_else(|| {
            FontscanError::MalformedEncodedString(format!(
                "no converter for {}",
                charset.name()
            ))
        })?;
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                FontscanError::MalformedEncodedString(format!(
                    "invalid {} sequence",
                    charset.name()
                ))
            })
    }
}

/// Hangul compatibility jamo for the 19 initial consonants
const JOHAB_INITIAL_JAMO: [u16; 19] = [
    0x3131, 0x3132, 0x3134, 0x3137, 0x3138, 0x3139, 0x3141, 0x3142, 0x3143, 0x3145, 0x3146,
    0x3147, 0x3148, 0x3149, 0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

/// Hangul compatibility jamo for the 27 final consonants
const JOHAB_FINAL_JAMO: [u16; 27] = [
    0x3131, 0x3132, 0x3133, 0x3134, 0x3135, 0x3136, 0x3137, 0x3139, 0x313A, 0x313B, 0x313C,
    0x313D, 0x313E, 0x313F, 0x3140, 0x3141, 0x3142, 0x3144, 0x3145, 0x3146, 0x3147, 0x3148,
    0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

/// 5-bit initial code: 1 is the fill code, 2..=20 the consonants
fn johab_initial(code: u16) -> Option<Option<u16>> {
    match code {
        1 => Some(None),
        2..=20 => Some(Some(code - 2)),
        _ => None,
    }
}

/// 5-bit medial code: 2 is the fill code, four runs of vowels
fn johab_medial(code: u16) -> Option<Option<u16>> {
    match code {
        2 => Some(None),
        3..=7 => Some(Some(code - 3)),
        10..=15 => Some(Some(code - 5)),
        18..=23 => Some(Some(code - 7)),
        26..=29 => Some(Some(code - 9)),
        _ => None,
    }
}

/// 5-bit final code: 1 is the fill code, 18 is unused
fn johab_final(code: u16) -> Option<Option<u16>> {
    match code {
        1 => Some(None),
        2..=17 => Some(Some(code - 1)),
        19..=29 => Some(Some(code - 2)),
        _ => None,
    }
}

/// A Hangul syllable or lone jamo from a 16-bit Johab code
fn johab_hangul(code: u16) -> Option<char> {
    let initial = johab_initial((code >> 10) & 0x1F)?;
    let medial = johab_medial((code >> 5) & 0x1F)?;
    let last = johab_final(code & 0x1F)?;
    let scalar = match (initial, medial, last) {
        (Some(i), Some(m), f) => 0xAC00 + (i as u32 * 21 + m as u32) * 28 + f.unwrap_or(0) as u32,
        (Some(i), None, None) => JOHAB_INITIAL_JAMO[i as usize] as u32,
        (None, Some(m), None) => 0x314F + m as u32,
        (None, None, Some(f)) => JOHAB_FINAL_JAMO[f as usize - 1] as u32,
        _ => return None,
    };
    char::from_u32(scalar)
}

/// KS X 1001 (EUC-KR) bytes for a Johab symbol or hanja code
fn johab_to_ksx1001(lead: u8, trail: u8) -> Option<[u8; 2]> {
    let row = match lead {
        0xD9..=0xDE => (lead - 0xD9) * 2 + 0xA1,
        0xE0..=0xF9 => (lead - 0xE0) * 2 + 0xCA,
        _ => return None,
    };
    match trail {
        0x31..=0x7E => Some([row, trail + 0x70]),
        0x91..=0xA0 => Some([row, trail + 0x5E]),
        0xA1..=0xFE => Some([row + 1, trail]),
        _ => None,
    }
}

/// Decode Johab (KS X 1001 annex 3): Hangul is composed from its jamo bit
/// fields, symbols and hanja go through the EUC-KR table.
pub fn decode_johab(bytes: &[u8]) -> Result<String> {
    let malformed = || FontscanError::MalformedEncodedString("invalid Johab sequence".to_string());
    let mut text = String::new();
    text.try_reserve(bytes.len())?;
    let mut rest = bytes;
    while let Some((&lead, tail)) = rest.split_first() {
        if lead < 0x80 {
            text.push(lead as char);
            rest = tail;
            continue;
        }
        let (&trail, tail) = tail.split_first().ok_or_else(malformed)?;
        let c = match lead {
            0x84..=0xD3 if matches!(trail, 0x41..=0x7E | 0x81..=0xFE) => {
                johab_hangul(u16::from_be_bytes([lead, trail]))
            }
            0xD9..=0xDE | 0xE0..=0xF9 => johab_to_ksx1001(lead, trail).and_then(|ks| {
                encoding_rs::EUC_KR
                    .decode_without_bom_handling_and_without_replacement(&ks)
                    .and_then(|decoded| decoded.chars().next())
            }),
            _ => None,
        };
        text.push(c.ok_or_else(malformed)?);
        rest = tail;
    }
    Ok(text)
}

/// A Shift-JIS string has many high bits set
pub fn looks_like_sjis(bytes: &[u8]) -> bool {
    let high = bytes.iter().filter(|b| *b & 0x80 != 0).count();
    let low = bytes.len() - high;
    high * 2 > low
}

/// Big-endian UTF-16 code points, lazily decoded
pub fn utf16be_chars(bytes: &[u8]) -> Result<impl Iterator<Item = Result<char>> + '_> {
    if bytes.len() % 2 != 0 {
        return Err(FontscanError::MalformedEncodedString(format!(
            "odd UTF-16 length {}",
            bytes.len()
        )));
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    Ok(char::decode_utf16(units).map(|c| {
        c.map_err(|e| {
            FontscanError::MalformedEncodedString(format!(
                "unpaired surrogate 0x{:04X}",
                e.unpaired_surrogate()
            ))
        })
    }))
}

/// ISO-8859-1 code points, lazily decoded
pub fn latin1_chars(bytes: &[u8]) -> impl Iterator<Item = char> + '_ {
    bytes.iter().map(|&b| b as char)
}

/// Mac Roman code points, lazily decoded
pub fn mac_roman_chars(bytes: &[u8]) -> impl Iterator<Item = char> + '_ {
    bytes.iter().map(|&b| tables::mac_roman_char(b))
}

fn collect(chars: impl Iterator<Item = Result<char>>, capacity: usize) -> Result<String> {
    let mut text = String::new();
    text.try_reserve(capacity)?;
    for c in chars {
        text.push(c?);
    }
    Ok(text)
}

/// Pick the charset for a Macintosh Roman record, repairing mislabeled ones.
fn repair_mac_roman(record: &NameRecord<'_>) -> Result<Charset> {
    if record.language_id == MAC_LANGUAGE_ENGLISH && looks_like_sjis(record.bytes) {
        Ok(Charset::ShiftJis)
    } else if record.language_id == MAC_LANGUAGE_JAPANESE {
        Ok(Charset::ShiftJis)
    } else if record.language_id >= 0x100 {
        // Mac language ids stop at 150; larger ones are Microsoft LCIDs
        tables::mac_roman_fake(record.language_id).ok_or(FontscanError::UnrecognizedEncoding {
            platform_id: record.platform_id,
            encoding_id: record.encoding_id,
        })
    } else {
        Ok(Charset::MacRoman)
    }
}

fn decode(
    charset: Charset,
    bytes: &[u8],
    converter: &dyn CharsetConverter,
    redecoded: bool,
) -> Result<String> {
    match charset {
        Charset::Utf16Be => collect(utf16be_chars(bytes)?, bytes.len() * 3 / 2),
        Charset::Ascii | Charset::Latin1 => collect(latin1_chars(bytes).map(Ok), bytes.len() * 2),
        Charset::MacRoman => collect(mac_roman_chars(bytes).map(Ok), bytes.len() * 3),
        _ => match converter.convert(charset, bytes) {
            Ok(text) => Ok(text),
            Err(e) if !redecoded => {
                log::trace!("{} conversion failed ({}), retrying as UTF-16BE", charset.name(), e);
                decode(Charset::Utf16Be, bytes, converter, true)
            }
            Err(e) => Err(e),
        },
    }
}

/// Convert one name record to UTF-8.
///
/// Fails when the record's encoding is unknown, its bytes do not decode, or
/// the result holds nothing but spaces and line breaks.
pub fn transcode(record: &NameRecord<'_>, converter: &dyn CharsetConverter) -> Result<String> {
    let mut charset = tables::resolve_encoding(record.platform_id, record.encoding_id).ok_or(
        FontscanError::UnrecognizedEncoding {
            platform_id: record.platform_id,
            encoding_id: record.encoding_id,
        },
    )?;
    if charset == Charset::MacRoman {
        charset = repair_mac_roman(record)?;
    }

    let mut text = decode(charset, record.bytes, converter, false)?;
    // names end at the first NUL
    if let Some(end) = text.find('\0') {
        text.truncate(end);
    }
    if text
        .trim_start_matches(' ')
        .trim_end_matches([' ', '\r', '\n'])
        .is_empty()
    {
        return Err(FontscanError::MalformedEncodedString(format!(
            "blank {} name {}",
            charset.name(),
            record.name_id
        )));
    }
    Ok(text)
}

/// Language of a name record, with Mac Roman records that look like
/// Shift-JIS treated as Japanese.
pub fn name_language(record: &NameRecord<'_>) -> Option<Language> {
    let mut language_id = record.language_id;
    if record.platform_id == PLATFORM_MACINTOSH
        && record.encoding_id == MAC_ENCODING_ROMAN
        && looks_like_sjis(record.bytes)
    {
        language_id = MAC_LANGUAGE_JAPANESE;
    }
    tables::resolve_language(record.platform_id, language_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::mock::utf16be;

    fn record(platform_id: u16, encoding_id: u16, language_id: u16, bytes: &[u8]) -> NameRecord<'_> {
        NameRecord {
            platform_id,
            encoding_id,
            language_id,
            name_id: 1,
            bytes,
        }
    }

    struct FailingConverter;

    impl CharsetConverter for FailingConverter {
        fn convert(&self, charset: Charset, _bytes: &[u8]) -> Result<String> {
            Err(FontscanError::MalformedEncodedString(charset.name().to_string()))
        }
    }

    #[test]
    fn test_looks_like_sjis() {
        // 50/50 is not enough
        assert!(!looks_like_sjis(&[0x82, 0xA0, b'a', b'b']));
        assert!(looks_like_sjis(&[0x82, 0xA0, 0x82, b'a', b'b']));
        assert!(looks_like_sjis(&[0x82, 0xA0, b'a']));
        assert!(!looks_like_sjis(b"Regular"));
        assert!(!looks_like_sjis(b""));
    }

    #[test]
    fn test_utf16be_ascii() {
        let bytes = utf16be("Noto Sans");
        let text = transcode(&record(3, 1, 0x409, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "Noto Sans");
    }

    #[test]
    fn test_utf16be_surrogate_pair() {
        let bytes = utf16be("A\u{1F600}");
        let text = transcode(&record(0, 3, 0, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "A\u{1F600}");
    }

    #[test]
    fn test_utf16be_malformed() {
        let odd = [0x00, 0x41, 0x00];
        assert!(matches!(
            transcode(&record(3, 1, 0x409, &odd), &EncodingRsConverter),
            Err(FontscanError::MalformedEncodedString(_))
        ));
        let lone = [0xD8, 0x00, 0x00, 0x41];
        assert!(transcode(&record(3, 1, 0x409, &lone), &EncodingRsConverter).is_err());
    }

    #[test]
    fn test_latin1() {
        let text = transcode(&record(2, 2, 0, b"Caf\xe9"), &EncodingRsConverter).unwrap();
        assert_eq!(text, "Caf\u{e9}");
    }

    #[test]
    fn test_mac_roman() {
        let text = transcode(&record(1, 0, 0, b"\x80bc"), &EncodingRsConverter).unwrap();
        assert_eq!(text, "\u{C4}bc");
    }

    #[test]
    fn test_mac_english_that_looks_like_sjis() {
        // "ゴシック" in Shift-JIS
        let bytes = [0x83, 0x53, 0x83, 0x56, 0x83, 0x62, 0x83, 0x4E];
        let text = transcode(&record(1, 0, 0, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "ゴシック");
        assert_eq!(
            name_language(&record(1, 0, 0, &bytes)),
            Some(Language::Tag("ja"))
        );
    }

    #[test]
    fn test_mac_fake_language() {
        let text = transcode(&record(1, 0, 0x0409, b"Helvetica"), &EncodingRsConverter).unwrap();
        assert_eq!(text, "Helvetica");
        assert!(matches!(
            transcode(&record(1, 0, 0x0407, b"Helvetica"), &EncodingRsConverter),
            Err(FontscanError::UnrecognizedEncoding { .. })
        ));
    }

    #[test]
    fn test_unrecognized_encoding() {
        assert!(matches!(
            transcode(&record(3, 7, 0x409, b"xx"), &EncodingRsConverter),
            Err(FontscanError::UnrecognizedEncoding {
                platform_id: 3,
                encoding_id: 7
            })
        ));
    }

    #[test]
    fn test_fallback_retries_as_utf16() {
        let bytes = utf16be("Ming");
        let text = transcode(&record(3, 4, 0x404, &bytes), &FailingConverter).unwrap();
        assert_eq!(text, "Ming");

        let odd = [0xA4, 0xA4, 0xA4];
        assert!(transcode(&record(3, 4, 0x404, &odd), &FailingConverter).is_err());
    }

    #[test]
    fn test_general_converter() {
        // "明朝" in Big5
        let bytes = [0xA9, 0xFA, 0xB4, 0xC2];
        let text = transcode(&record(3, 4, 0x404, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "明朝");
    }

    #[test]
    fn test_johab_hangul_and_symbols() {
        // "A한글" then U+3000 from the first symbol row
        let bytes = [0x41, 0xD0, 0x65, 0x8B, 0x69, 0xD9, 0x31];
        assert_eq!(decode_johab(&bytes).unwrap(), "A한글\u{3000}");
        // lone initial consonant ㄱ
        assert_eq!(decode_johab(&[0x88, 0x41]).unwrap(), "ㄱ");
    }

    #[test]
    fn test_johab_rejects_bad_sequences() {
        assert!(decode_johab(&[0xD0]).is_err());
        assert!(decode_johab(&[0xD8, 0x31]).is_err());
        assert!(decode_johab(&[0x80, 0x41]).is_err());
    }

    #[test]
    fn test_johab_name_record() {
        let bytes = [0xD0, 0x65, 0x8B, 0x69];
        let text = transcode(&record(3, 6, 0x412, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "한글");
    }

    #[test]
    fn test_blank_names_fail() {
        let bytes = utf16be("   ");
        assert!(transcode(&record(3, 1, 0x409, &bytes), &EncodingRsConverter).is_err());
        assert!(transcode(&record(3, 1, 0x409, &[]), &EncodingRsConverter).is_err());
        let nul = utf16be("\0Foo");
        assert!(transcode(&record(3, 1, 0x409, &nul), &EncodingRsConverter).is_err());
    }

    #[test]
    fn test_line_break_names_fail() {
        for blank in ["\r\n", " \r\n", "\n", "  \r"] {
            let bytes = utf16be(blank);
            assert!(
                transcode(&record(3, 1, 0x409, &bytes), &EncodingRsConverter).is_err(),
                "{:?} should be rejected",
                blank
            );
        }
        let bytes = utf16be("Foo\r\n");
        let text = transcode(&record(3, 1, 0x409, &bytes), &EncodingRsConverter).unwrap();
        assert_eq!(text, "Foo\r\n");
    }

    #[test]
    fn test_name_language() {
        let bytes = utf16be("x");
        assert_eq!(
            name_language(&record(3, 1, 0x0411, &bytes)),
            Some(Language::Tag("ja"))
        );
        assert_eq!(
            name_language(&record(0, 3, 0, &bytes)),
            Some(Language::Untagged)
        );
        assert_eq!(name_language(&record(3, 1, 0x7777, &bytes)), None);
    }
}
