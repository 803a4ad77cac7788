// Benchmarks for note page extraction.

use criterion::{criterion_group, criterion_main, Criterion};
use note2markdown::extract_markdown;

fn bench_simple(c: &mut Criterion) {
    let html = r#"<div id="doc"><h1>Hello</h1><p>This is a <strong>simple</strong> note.</p></div>"#;
    c.bench_function("simple_note", |b| {
        b.iter(|| extract_markdown(html));
    });
}

fn bench_page(c: &mut Criterion) {
    let item = "<li>entry with <code>code</code> and <a href=\"/s/x\">a link</a></li>";
    let html = format!(
        "<html><head><script>var a = 1;</script></head><body><nav>menu</nav>\
         <div id=\"doc\"><h2>List</h2><ul>{}</ul></div></body></html>",
        item.repeat(200)
    );
    c.bench_function("long_list_page", |b| {
        b.iter(|| extract_markdown(&html));
    });
}

criterion_group!(benches, bench_simple, bench_page);
criterion_main!(benches);
