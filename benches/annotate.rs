use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gramfix::annotate::{apply, resolve};
use gramfix::Match;

fn fixture(words: usize, every: usize) -> (String, Vec<Match>) {
    let text: String = (0..words)
        .map(|i| format!("word{} ", i))
        .collect::<String>();
    let matches = (0..words)
        .step_by(every)
        .map(|i| {
            let offset = text
                .split_inclusive(' ')
                .take(i)
                .map(|w| w.chars().count())
                .sum();
            Match {
                offset,
                length: 4,
                message: "benchmark".to_string(),
                replacements: vec!["WORD".to_string()],
                rule: None,
            }
        })
        .collect();
    (text, matches)
}

fn bench_resolve(c: &mut Criterion) {
    let (text, matches) = fixture(500, 10);
    c.bench_function("resolve 500 words / 50 matches", |b| {
        b.iter(|| resolve(black_box(&text), black_box(&matches)))
    });
}

fn bench_apply(c: &mut Criterion) {
    let (text, matches) = fixture(500, 10);
    c.bench_function("apply 500 words / 50 matches", |b| {
        b.iter(|| apply(black_box(&text), black_box(&matches)).unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_apply);
criterion_main!(benches);
