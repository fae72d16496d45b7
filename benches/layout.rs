//! Layout, diff and editing performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use goatee::text::{Layout, MonospaceMeasurer, wrap_rows};
use goatee::{Command, Editor, EditorOptions, ReplaceText, minimal_edit};
use std::hint::black_box;

fn prose(words: usize) -> String {
    let vocab = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing"];
    let mut out = String::new();
    for i in 0..words {
        out.push_str(vocab[i % vocab.len()]);
        out.push(if i % 17 == 16 { '\n' } else { ' ' });
    }
    out
}

fn layout_build(c: &mut Criterion) {
    let m = MonospaceMeasurer::default();
    let text = prose(2_000);

    c.bench_function("layout_build_2k_words", |b| {
        b.iter(|| Layout::build(black_box(&text), 80.0, &m));
    });

    let layout = Layout::build(&text, 80.0, &m);
    c.bench_function("wrap_rows_2k_words", |b| {
        b.iter(|| wrap_rows(black_box(layout.glyphs()), 80.0));
    });
}

fn layout_splice(c: &mut Criterion) {
    let m = MonospaceMeasurer::default();
    let text = prose(2_000);
    let mut layout = Layout::build(&text, 80.0, &m);
    let mid = layout.len() / 2;

    c.bench_function("layout_insert_delete_mid", |b| {
        b.iter(|| {
            let insert = ReplaceText {
                is_local: true,
                pos: mid,
                len: 0,
                value: "x".to_string(),
            };
            layout.apply_replace(&insert, &m).unwrap();
            let delete = ReplaceText {
                is_local: true,
                pos: mid,
                len: 1,
                value: String::new(),
            };
            layout.apply_replace(&delete, &m).unwrap();
        });
    });
}

fn diff_snapshots(c: &mut Criterion) {
    let old = prose(5_000);
    let mut new = old.clone();
    new.insert_str(old.len() / 2, "pasted text ");

    c.bench_function("minimal_edit_30k_chars", |b| {
        b.iter(|| minimal_edit(black_box(&old), black_box(&new)));
    });
}

fn editor_typing(c: &mut Criterion) {
    c.bench_function("editor_type_100_chars", |b| {
        b.iter(|| {
            let options = EditorOptions::default().with_wrap_width(80.0);
            let mut ed = Editor::local("", MonospaceMeasurer::default(), options);
            for _ in 0..100 {
                ed.execute(Command::insert_char('a')).unwrap();
            }
            black_box(ed.cursor())
        });
    });
}

criterion_group!(
    benches,
    layout_build,
    layout_splice,
    diff_snapshots,
    editor_typing
);
criterion_main!(benches);
