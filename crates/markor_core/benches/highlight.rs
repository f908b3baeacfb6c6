use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markor_core::convert::MarkdownConverter;
use markor_core::{Document, FormatId, FormatRegistry, RenderOptions, TextConverter};

fn sample_markdown(sections: usize) -> String {
    (0..sections)
        .map(|i| {
            format!(
                "## Section {i}\n\nSome **bold**, _italic_ and `code` with a link to \
                 https://example.com/{i} and colour #ff{i:04x}.\n\n\
                 - [ ] task {i}\n- [x] done\n1. first\n2. second\n\n\
                 ```rust\nfn main() {{ println!(\"{i}\"); }}\n```\n\n> quote {i}\n\n"
            )
        })
        .collect()
}

fn bench_highlight(c: &mut Criterion) {
    let registry = FormatRegistry::default();
    let markdown = registry.select_format(Some(FormatId::Markdown), &Document::open("bench.md", None));
    let csv = registry.select_format(None, &Document::open("bench.csv", None));

    let small = sample_markdown(10);
    let large = sample_markdown(500);
    let table: String = (0..2_000)
        .map(|i| format!("{i},\"name {i}\",{},note\n", i * 7))
        .collect();

    c.bench_function("highlight markdown 10 sections", |b| {
        b.iter(|| markdown.highlight(black_box(&small)))
    });

    c.bench_function("highlight markdown 500 sections", |b| {
        b.iter(|| markdown.highlight(black_box(&large)))
    });

    c.bench_function("highlight csv 2k rows", |b| {
        b.iter(|| csv.highlight(black_box(&table)))
    });
}

fn bench_convert(c: &mut Criterion) {
    let options = RenderOptions::default();
    let large = sample_markdown(500);

    c.bench_function("convert markdown 500 sections", |b| {
        b.iter(|| MarkdownConverter.convert(black_box(&large), &options, None))
    });
}

criterion_group!(benches, bench_highlight, bench_convert);
criterion_main!(benches);
