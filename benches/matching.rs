use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jaro_winkler_trie::{similarity, JaroWinklerSimilarity, TrieMap, TrieSet};

/// Deterministic pseudo-random name-like terms.
fn terms(count: usize) -> Vec<String> {
    let syllables = [
        "an", "be", "ri", "to", "la", "mo", "ke", "su", "dor", "lin", "ska", "vel", "ra", "ne",
    ];
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (state >> 33) as usize
    };

    (0..count)
        .map(|_| {
            let parts = 2 + next() % 4;
            let mut term = String::new();
            for _ in 0..parts {
                term.push_str(syllables[next() % syllables.len()]);
            }
            term
        })
        .collect()
}

/// Benchmark building both trie variants from unsorted terms
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1_000, 10_000, 100_000].iter() {
        let input = terms(*size);

        group.bench_with_input(BenchmarkId::new("TrieSet", size), &input, |b, input| {
            b.iter(|| black_box(input.iter().collect::<TrieSet>()));
        });

        group.bench_with_input(BenchmarkId::new("TrieMap", size), &input, |b, input| {
            b.iter(|| {
                black_box(
                    input
                        .iter()
                        .enumerate()
                        .map(|(i, t)| (t, i))
                        .collect::<TrieMap<usize>>(),
                )
            });
        });
    }

    group.finish();
}

/// Benchmark one query against a dictionary: trie search vs comparing every term
fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");

    for size in [1_000, 10_000, 100_000].iter() {
        let input = terms(*size);
        let query = format!("{}x", input[input.len() / 2]);
        let matcher = JaroWinklerSimilarity::of_set(&input);

        for threshold in [0.8, 0.9, 0.95] {
            let id = format!("{size}/{threshold}");

            group.bench_function(BenchmarkId::new("Trie", &id), |b| {
                b.iter(|| black_box(matcher.match_query(black_box(&query), threshold)));
            });

            group.bench_function(BenchmarkId::new("Linear", &id), |b| {
                b.iter(|| {
                    input
                        .iter()
                        .filter_map(|term| similarity(term, black_box(&query), threshold))
                        .count()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_match);
criterion_main!(benches);
