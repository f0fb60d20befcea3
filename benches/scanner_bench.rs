use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hebpal::{normalize, NormalizationRules, PalindromeScanner, ScanConfig};

const TEST_SIZES: &[(usize, &str)] = &[
    (50, "verse"),
    (200, "paragraph"),
    (800, "chapter_excerpt"),
];

fn generate_test_text(char_count: usize) -> String {
    let base_phrases = [
        "בְּרֵאשִׁ֖ית בָּרָ֣א אֱלֹהִ֑ים",
        "אַבָּא וְאִמָּא",
        "מַיִם חַיִּים",
        "וְנָתְנוּ (א,ב) לוֹ",
        "שֶׁמֶשׁ וְתוּת",
        "[יא ג] נָשִׂיא",
    ];

    let mut text = String::new();
    let mut current_len = 0;
    let mut phrase_idx = 0;

    while current_len < char_count {
        let phrase = base_phrases[phrase_idx % base_phrases.len()];
        text.push_str(phrase);
        text.push(' ');
        current_len += phrase.chars().count() + 1;
        phrase_idx += 1;
    }

    text.chars().take(char_count).collect()
}

fn bench_scan_by_size(c: &mut Criterion) {
    let reference_aware = PalindromeScanner::with_default_config();
    let plain = PalindromeScanner::new(ScanConfig {
        rules: NormalizationRules::plain(),
        ..ScanConfig::default()
    })
    .unwrap();

    for &(size, size_name) in TEST_SIZES {
        let test_text = generate_test_text(size);

        let mut group = c.benchmark_group(format!("scan_{size_name}"));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("reference_aware", |b| {
            b.iter(|| reference_aware.scan(black_box(&test_text)))
        });

        group.bench_function("plain", |b| {
            b.iter(|| plain.scan(black_box(&test_text)))
        });

        group.finish();
    }
}

fn bench_max_length(c: &mut Criterion) {
    let test_text = generate_test_text(400);
    let mut group = c.benchmark_group("max_length");

    for max_length in [10, 25, 50] {
        let scanner = PalindromeScanner::new(ScanConfig::with_range(3, max_length)).unwrap();
        group.bench_function(format!("max_{max_length}"), |b| {
            b.iter(|| scanner.scan(black_box(&test_text)))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let test_text = generate_test_text(800);
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Bytes(test_text.len() as u64));

    group.bench_function("default_rules", |b| {
        b.iter(|| normalize(black_box(&test_text)))
    });

    group.finish();
}

criterion_group!(benches, bench_scan_by_size, bench_max_length, bench_normalize);
criterion_main!(benches);
