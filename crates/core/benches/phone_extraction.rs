use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulsearc_core::phone;

fn sample_html(repeats: usize) -> String {
    let snippet = r#"
        <div class="contact">
            <p>Call us at 555-123-4567 or (555) 987-6543.</p>
            <p>UK callers: 020 7946 0958 / +44 7911 123456.</p>
            <p>Some unrelated text with numbers like 2024 and 99.9%.</p>
        </div>
    "#;
    snippet.repeat(repeats)
}

fn bench_extract(c: &mut Criterion) {
    let small = sample_html(1);
    let large = sample_html(200);

    c.bench_function("phone::extract/single_page", |b| {
        b.iter(|| phone::extract(black_box(&small)));
    });

    c.bench_function("phone::extract/large_scraped_body", |b| {
        b.iter(|| phone::extract(black_box(&large)));
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("phone::normalize", |b| {
        b.iter(|| phone::normalize(black_box("+1 (555) 123-4567")));
    });
}

criterion_group!(benches, bench_extract, bench_normalize);
criterion_main!(benches);
