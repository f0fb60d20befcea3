use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hebpal::normalizer::references::strip_references;
use regex_automata::meta::Regex;

const SEPARATED_PAIR: &str = r#"["״(]?\b[א-ת]{1,3}[,:][א-ת]{1,3}\b["״)]?"#;
const BRACKETED_PAIR: &str = r"[(\[][א-ת]{1,3}\s+[א-ת]{1,3}[)\]]";

const QUOTED_VERSES: &str = "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר (א:ג) וַיְהִי אוֹר. \
    שְׁמַע יִשְׂרָאֵל \"ו,ד\" ה' אֱלֹהֵינוּ [ו ד] ה' אֶחָד. \
    הַשָּׁמַיִם מְסַפְּרִים כְּבוֹד־אֵל יט,ב וּמַעֲשֵׂה יָדָיו מַגִּיד הָרָקִיעַ. ";

fn regex_strip(separated: &Regex, bracketed: &Regex, text: &str) -> String {
    let replace = |regex: &Regex, input: &str| {
        let mut output = String::with_capacity(input.len());
        let mut last = 0;
        for m in regex.find_iter(input) {
            output.push_str(&input[last..m.start()]);
            output.push(' ');
            last = m.end();
        }
        output.push_str(&input[last..]);
        output
    };
    replace(bracketed, &replace(separated, text))
}

fn bench_explicit_vs_regex(c: &mut Criterion) {
    let separated = Regex::new(SEPARATED_PAIR).unwrap();
    let bracketed = Regex::new(BRACKETED_PAIR).unwrap();

    for repeat in [1, 10, 100] {
        let text = QUOTED_VERSES.repeat(repeat);

        let mut group = c.benchmark_group(format!("strip_references_x{repeat}"));
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_function("explicit_scanner", |b| {
            b.iter(|| strip_references(black_box(&text)))
        });

        group.bench_function("regex_automata", |b| {
            b.iter(|| regex_strip(&separated, &bracketed, black_box(&text)))
        });

        group.finish();
    }
}

fn bench_regex_compilation(c: &mut Criterion) {
    c.bench_function("regex_compilation", |b| {
        b.iter(|| {
            black_box(Regex::new(SEPARATED_PAIR).unwrap());
            black_box(Regex::new(BRACKETED_PAIR).unwrap());
        })
    });
}

criterion_group!(benches, bench_regex_compilation, bench_explicit_vs_regex);
criterion_main!(benches);
