//! Benchmarks for page wiring and event handling

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use redpot_ui::prelude::*;

fn create_admin_page(tables: usize, rows: usize, fields: usize) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let nav = doc.append_element(body, "nav", &[("id", "sidenav")]);
    doc.append_element(nav, "ul", &[]);

    // Collapsible sections
    for t in 0..tables {
        let id = format!("section-{}", t);
        doc.append_element(body, "a", &[("class", "section-title"), ("id", id.as_str())]);
        doc.append_text_element(body, "h3", &[], &format!("Section {}", t));
        let table = doc.append_element(body, "table", &[("class", "collapsible")]);
        for r in 0..rows {
            let row = doc.append_element(table, "tr", &[("class", "item"), ("data-created-on", "2021-05-06")]);
            doc.append_text_element(row, "td", &[], &format!("Row {}", r));
        }
    }

    // Checkbox-controlled form fields
    let form = doc.append_element(body, "form", &[]);
    for f in 0..fields {
        let controller = format!("controller-{}", f);
        doc.append_element(form, "input", &[("type", "checkbox"), ("id", controller.as_str())]);
        let group = doc.append_element(form, "div", &[("class", "form-group")]);
        doc.append_element(group, "input", &[("type", "text"), ("data-depends-on", controller.as_str())]);
    }

    doc
}

fn benchmark_ready_small(c: &mut Criterion) {
    c.bench_function("ready_5tables_20rows_10fields", |b| {
        b.iter(|| {
            let mut page = Page::new(create_admin_page(5, 20, 10), PageConfig::default());
            black_box(page.ready());
        })
    });
}

fn benchmark_ready_large(c: &mut Criterion) {
    c.bench_function("ready_20tables_100rows_50fields", |b| {
        b.iter(|| {
            let mut page = Page::new(create_admin_page(20, 100, 50), PageConfig::default());
            black_box(page.ready());
        })
    });
}

fn benchmark_toggle(c: &mut Criterion) {
    let mut page = Page::new(create_admin_page(1, 500, 0), PageConfig::default());
    page.ready();
    let affordance = *page.disclosures()[0].affordance();

    c.bench_function("toggle_500rows", |b| {
        b.iter(|| {
            black_box(page.dispatch(Event::Click(affordance)));
        })
    });
}

criterion_group!(
    benches,
    benchmark_ready_small,
    benchmark_ready_large,
    benchmark_toggle,
);

criterion_main!(benches);
