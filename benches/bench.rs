// this_file: fontscan/benches/bench.rs
//
// Benchmarks for name selection and style classification

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fontscan::{
    face::NameRecord,
    names::{select_names, NameIndex, NameTarget},
    style::classify_styles,
    transcode::{transcode, EncodingRsConverter},
};

fn utf16be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
}

/// A name table shaped like a typical multilingual family
fn name_strings() -> Vec<(u16, u16, u16, u16, Vec<u8>)> {
    let mut strings = Vec::new();
    for (lang, family, style) in [
        (0x0409, "Example Sans", "Bold Italic"),
        (0x0407, "Beispiel Sans", "Fett Kursiv"),
        (0x040C, "Exemple Sans", "Gras Italique"),
        (0x0411, "例 Sans", "太字 斜体"),
    ] {
        strings.push((3, 1, lang, 1, utf16be(family)));
        strings.push((3, 1, lang, 2, utf16be(style)));
        strings.push((3, 1, lang, 4, utf16be(&format!("{} {}", family, style))));
    }
    strings.push((1, 0, 0, 1, b"Example Sans".to_vec()));
    strings.push((1, 0, 0, 2, b"Bold Italic".to_vec()));
    strings.push((3, 1, 0x0409, 6, utf16be("ExampleSans-BoldItalic")));
    strings
}

fn records(strings: &[(u16, u16, u16, u16, Vec<u8>)]) -> Vec<NameRecord<'_>> {
    strings
        .iter()
        .map(|(platform_id, encoding_id, language_id, name_id, bytes)| NameRecord {
            platform_id: *platform_id,
            encoding_id: *encoding_id,
            language_id: *language_id,
            name_id: *name_id,
            bytes,
        })
        .collect()
}

pub fn name_selection(c: &mut Criterion) {
    let strings = name_strings();
    let records = records(&strings);

    c.bench_function("name_index", |b| {
        b.iter(|| NameIndex::new(black_box(&records)).unwrap())
    });

    let index = NameIndex::new(&records).unwrap();
    c.bench_function("select_names", |b| {
        b.iter(|| {
            select_names(
                black_box(&records),
                &index,
                &EncodingRsConverter,
                NameTarget::Face,
            )
            .unwrap()
        })
    });

    c.bench_function("transcode_utf16", |b| {
        b.iter(|| transcode(black_box(&records[2]), &EncodingRsConverter).unwrap())
    });
}

pub fn style_classification(c: &mut Criterion) {
    let styles = [
        "Semi Condensed Extra Bold Oblique",
        "Halbfett Kursiv",
        "Regular",
        "Ultra Light",
    ];
    c.bench_function("classify_styles", |b| {
        b.iter(|| classify_styles(black_box(styles.iter().copied())))
    });
}

criterion_group!(benches, name_selection, style_classification);
criterion_main!(benches);
