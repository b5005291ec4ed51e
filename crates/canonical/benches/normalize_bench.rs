use std::sync::Arc;

use canonical::{Lexicon, NormalizeConfig, Normalizer};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SENTENCE: &str = "Prof. Budi dari Universitas Indonesia meneliti klasifikasi teks pada 2021 \
     dengan akurasi 87% (Wijaya, 2020). Hubungi budi@kampus.ac.id untuk data. ";

fn bench_normalize(c: &mut Criterion) {
    let lexicon = Arc::new(Lexicon::builtin().expect("lexicon"));
    let normalizer = Normalizer::new(lexicon, NormalizeConfig::default()).expect("normalizer");
    let mut group = c.benchmark_group("normalize");

    for repeats in [1usize, 8, 64, 512] {
        let text = SENTENCE.repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("sentences_{}", repeats * 2), |b| {
            b.iter(|| normalizer.normalize(black_box(&text)))
        });
    }

    group.finish();
}

fn bench_lexicon_build(c: &mut Criterion) {
    c.bench_function("lexicon_builtin", |b| {
        b.iter(|| Lexicon::builtin().expect("lexicon"))
    });
}

criterion_group!(benches, bench_normalize, bench_lexicon_build);
criterion_main!(benches);
