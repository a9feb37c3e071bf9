// this_file: fontscan/src/woff.rs
//
// WOFF 1.0 container unwrapping

use crate::{FontscanError, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

pub const WOFF_SIGNATURE: &[u8; 4] = b"wOFF";
pub const WOFF2_SIGNATURE: &[u8; 4] = b"wOF2";

const HEADER_LEN: usize = 44;
const DIRECTORY_ENTRY_LEN: usize = 20;
const SFNT_HEADER_LEN: usize = 12;
const SFNT_RECORD_LEN: usize = 16;

fn malformed(what: &str) -> FontscanError {
    FontscanError::ParserFailure(format!("malformed WOFF: {}", what))
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| malformed("truncated header"))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| malformed("truncated header"))
}

pub fn is_woff(data: &[u8]) -> bool {
    data.get(..4) == Some(WOFF_SIGNATURE.as_slice())
}

pub fn is_woff2(data: &[u8]) -> bool {
    data.get(..4) == Some(WOFF2_SIGNATURE.as_slice())
}

struct TableEntry {
    tag: u32,
    offset: usize,
    comp_length: usize,
    orig_length: usize,
    checksum: u32,
}

/// Rebuild the sfnt a WOFF file wraps
pub fn decode_woff(data: &[u8]) -> Result<Vec<u8>> {
    if !is_woff(data) || data.len() < HEADER_LEN {
        return Err(malformed("bad signature"));
    }
    let flavor = read_u32(data, 4)?;
    let num_tables = read_u16(data, 12)? as usize;

    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let base = HEADER_LEN + i * DIRECTORY_ENTRY_LEN;
        tables.push(TableEntry {
            tag: read_u32(data, base)?,
            offset: read_u32(data, base + 4)? as usize,
            comp_length: read_u32(data, base + 8)? as usize,
            orig_length: read_u32(data, base + 12)? as usize,
            checksum: read_u32(data, base + 16)?,
        });
    }
    tables.sort_by_key(|table| table.tag);

    let header_len = SFNT_HEADER_LEN + num_tables * SFNT_RECORD_LEN;
    let body_len: usize = tables
        .iter()
        .map(|table| (table.orig_length + 3) & !3)
        .sum();
    let mut sfnt = Vec::new();
    sfnt.try_reserve_exact(header_len + body_len)?;

    // offset table
    let entry_selector = if num_tables == 0 {
        0
    } else {
        usize::BITS - 1 - num_tables.leading_zeros()
    };
    let search_range = (1usize << entry_selector) * SFNT_RECORD_LEN;
    let range_shift = (num_tables * SFNT_RECORD_LEN).saturating_sub(search_range);
    sfnt.extend_from_slice(&flavor.to_be_bytes());
    sfnt.extend_from_slice(&(num_tables as u16).to_be_bytes());
    sfnt.extend_from_slice(&(search_range as u16).to_be_bytes());
    sfnt.extend_from_slice(&(entry_selector as u16).to_be_bytes());
    sfnt.extend_from_slice(&(range_shift as u16).to_be_bytes());

    let mut offset = header_len;
    for table in &tables {
        sfnt.extend_from_slice(&table.tag.to_be_bytes());
        sfnt.extend_from_slice(&table.checksum.to_be_bytes());
        sfnt.extend_from_slice(&(offset as u32).to_be_bytes());
        sfnt.extend_from_slice(&(table.orig_length as u32).to_be_bytes());
        offset += (table.orig_length + 3) & !3;
    }

    for table in &tables {
        let stored = data
            .get(table.offset..table.offset + table.comp_length)
            .ok_or_else(|| malformed("table outside the file"))?;
        let start = sfnt.len();
        if table.comp_length < table.orig_length {
            ZlibDecoder::new(stored)
                .take(table.orig_length as u64)
                .read_to_end(&mut sfnt)
                .map_err(|e| malformed(&e.to_string()))?;
        } else if table.comp_length == table.orig_length {
            sfnt.extend_from_slice(stored);
        } else {
            return Err(malformed("compressed table larger than original"));
        }
        if sfnt.len() - start != table.orig_length {
            return Err(malformed("table length mismatch"));
        }
        sfnt.resize((sfnt.len() + 3) & !3, 0);
    }
    Ok(sfnt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::ZlibEncoder, Compression};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    /// A WOFF holding `tables` as (tag, data, compress)
    fn build_woff(flavor: &[u8; 4], tables: &[(&[u8; 4], &[u8], bool)]) -> Vec<u8> {
        let mut directory = Vec::new();
        let mut body = Vec::new();
        let data_start = HEADER_LEN + tables.len() * DIRECTORY_ENTRY_LEN;
        for (tag, data, compress) in tables {
            let stored = if *compress {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
                encoder.write_all(data).unwrap();
                encoder.finish().unwrap()
            } else {
                data.to_vec()
            };
            directory.extend_from_slice(*tag);
            directory.extend_from_slice(&((data_start + body.len()) as u32).to_be_bytes());
            directory.extend_from_slice(&(stored.len() as u32).to_be_bytes());
            directory.extend_from_slice(&(data.len() as u32).to_be_bytes());
            directory.extend_from_slice(&0x1234_5678u32.to_be_bytes());
            body.extend_from_slice(&stored);
            body.resize((body.len() + 3) & !3, 0);
        }

        let mut woff = Vec::new();
        woff.extend_from_slice(WOFF_SIGNATURE);
        woff.extend_from_slice(flavor);
        woff.extend_from_slice(&((data_start + body.len()) as u32).to_be_bytes());
        woff.extend_from_slice(&(tables.len() as u16).to_be_bytes());
        woff.resize(HEADER_LEN, 0);
        woff.extend_from_slice(&directory);
        woff.extend_from_slice(&body);
        woff
    }

    #[test]
    fn test_decode_woff() {
        let name = [b'n'; 300];
        let tables: [(&[u8; 4], &[u8], bool); 2] =
            [(b"name", &name, true), (b"head", b"abcde", false)];
        let woff = build_woff(b"\0\x01\0\0", &tables);
        let sfnt = decode_woff(&woff).unwrap();

        assert_eq!(&sfnt[..4], b"\0\x01\0\0");
        assert_eq!(read_u16(&sfnt, 4).unwrap(), 2);
        assert_eq!(read_u16(&sfnt, 6).unwrap(), 32);
        assert_eq!(read_u16(&sfnt, 8).unwrap(), 1);
        assert_eq!(read_u16(&sfnt, 10).unwrap(), 0);

        // records sorted by tag: head, then name
        assert_eq!(&sfnt[12..16], b"head");
        let head_offset = read_u32(&sfnt, 20).unwrap() as usize;
        assert_eq!(head_offset, 44);
        assert_eq!(&sfnt[head_offset..head_offset + 5], b"abcde");

        assert_eq!(&sfnt[28..32], b"name");
        let name_offset = read_u32(&sfnt, 36).unwrap() as usize;
        assert_eq!(name_offset, 52);
        assert_eq!(read_u32(&sfnt, 40).unwrap(), 300);
        assert_eq!(&sfnt[name_offset..name_offset + 300], &name[..]);
        assert_eq!(sfnt.len(), 352);
    }

    #[test]
    fn test_decode_woff_rejects_truncated_tables() {
        let tables: [(&[u8; 4], &[u8], bool); 1] = [(b"CFF ", b"abcdefgh", false)];
        let mut woff = build_woff(b"OTTO", &tables);
        woff.truncate(woff.len() - 4);
        assert!(matches!(
            decode_woff(&woff),
            Err(FontscanError::ParserFailure(_))
        ));
        assert!(decode_woff(b"wOFF").is_err());
        assert!(decode_woff(b"\0\x01\0\0").is_err());
    }

    #[test]
    fn test_signatures() {
        assert!(is_woff(b"wOFF\0\x01"));
        assert!(is_woff2(b"wOF2\0\x01"));
        assert!(!is_woff(b"wOF"));
    }
}
