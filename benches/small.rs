use criterion::{Criterion, criterion_group, criterion_main};

pub fn criterion_benchmark(c: &mut Criterion) {
    use bibtex_records::{Records, parse_all, parse_one, to_string_many};

    let sample = std::fs::read_to_string("assets/sample.bib").unwrap();
    let input_str = sample.repeat(200);

    c.bench_function("sample parse all", |b| b.iter(|| parse_all(&input_str)));

    c.bench_function("sample count records", |b| {
        b.iter(|| Records::new(&input_str).count())
    });

    let escaped = format!(
        "@misc{{key, note = {{{}}}}}",
        r"text with \{escaped\} braces and {nested {groups}} ".repeat(500)
    );
    c.bench_function("escaped value", |b| b.iter(|| parse_one(&escaped)));

    let records = parse_all(&input_str);
    c.bench_function("sample write all", |b| b.iter(|| to_string_many(&records)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
