use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plagscan::{Detector, DetectorConfig, Lexicon};

const TARGET: &str = "Penelitian ini membangun model klasifikasi teks otomatis untuk dokumen \
     berita berbahasa Indonesia yang dikumpulkan dari portal daring. Model tersebut \
     memanfaatkan jaringan saraf konvolusional yang dilatih ulang memakai korpus besar. \
     Hubungi peneliti di riset@kampus.ac.id untuk data lengkap. ";
const SOURCE: &str = "Studi ini mengembangkan sistem pengelompokan berita otomatis untuk \
     dokumen berbahasa Indonesia dari berbagai portal daring. Jaringan saraf dalam dilatih \
     memakai korpus daring yang besar dan beragam selama beberapa bulan. ";

fn detector(parallel: bool) -> Detector {
    let lexicon = Arc::new(Lexicon::builtin().expect("lexicon"));
    Detector::new(lexicon, DetectorConfig::default().with_parallel(parallel)).expect("detector")
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    group.sample_size(20);

    for repeats in [1usize, 8, 32] {
        let target = TARGET.repeat(repeats);
        let source = SOURCE.repeat(repeats);
        group.throughput(Throughput::Bytes((target.len() + source.len()) as u64));

        for parallel in [false, true] {
            let detector = detector(parallel);
            let id = BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, repeats);
            group.bench_with_input(id, &repeats, |b, _| {
                b.iter(|| {
                    detector
                        .detect(black_box(&target), black_box(&source), "bench")
                        .expect("detect")
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
