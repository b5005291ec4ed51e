use std::sync::Arc;

use canonical::{Lexicon, NormalizeConfig, Normalizer};
use similarity::{SimilarityAnalyzer, SimilarityConfig};

fn normalizer() -> Normalizer {
    Normalizer::new(
        Arc::new(Lexicon::builtin().expect("lexicon")),
        NormalizeConfig::default(),
    )
    .expect("normalizer")
}

fn analyzer() -> SimilarityAnalyzer {
    SimilarityAnalyzer::new(normalizer(), SimilarityConfig::default()).expect("analyzer")
}

const SAMPLES: &[&str] = &[
    "",
    "Ahmad Suharto bekerja di Jakarta.",
    "Penelitian ini membangun model klasifikasi teks otomatis untuk berita daring. \
     Model dilatih memakai korpus besar.",
    "Hubungi budi@kampus.ac.id atau 081234567890 (tel. 021 5550123) sebelum 2024.",
    "BAB I PENDAHULUAN\n1. Latar belakang\nTabel 3 halaman 12 menunjukkan 45% kenaikan (Wijaya, 2020) [4].",
    "The ﬁnal value = (a + b) / 2 is shown in Figure 2.1 on page 7!",
    "Dr. Sri Mulyani dari Universitas Gadjah Mada menyampaikan hasil riset?",
];

#[test]
fn character_and_structural_levels_are_symmetric() {
    let a = analyzer();
    for x in SAMPLES {
        for y in SAMPLES {
            let xy = a.analyze(x, y);
            let yx = a.analyze(y, x);
            assert_eq!(xy.character_level, yx.character_level, "{x:?} / {y:?}");
            assert_eq!(xy.structural_level, yx.structural_level, "{x:?} / {y:?}");
            assert_eq!(xy.word_level, yx.word_level, "{x:?} / {y:?}");
            assert!((xy.semantic_level - yx.semantic_level).abs() < 1e-9);
        }
    }
}

#[test]
fn exact_copy_scores_full_word_and_character_levels() {
    let a = analyzer();
    for text in SAMPLES.iter().filter(|s| !s.is_empty()) {
        let analysis = a.analyze(text, text);
        assert_eq!(analysis.character_level, 1.0, "{text:?}");
        assert_eq!(analysis.word_level, 1.0, "{text:?}");
    }
}

#[test]
fn normalization_is_idempotent() {
    let n = normalizer();
    for text in SAMPLES {
        let once = n.normalize(text);
        assert_eq!(n.normalize(&once), once, "{text:?}");
    }
}

#[test]
fn shared_vocabulary_never_lowers_adjusted_semantic_level() {
    let a = analyzer();
    let source = ["model", "jaringan", "saraf", "korpus", "berita", "teks", "otomatis", "pelatihan"];
    let filler = ["qqq", "qqz", "qzq", "zqq", "zzq", "zqz", "qzz", "zzz"];
    let source_text = source.join(" ");

    let mut previous = f64::NEG_INFINITY;
    for shared in 0..=source.len() {
        let target: Vec<&str> = source[..shared]
            .iter()
            .chain(filler[shared..].iter())
            .copied()
            .collect();
        let analysis = a.analyze(&target.join(" "), &source_text);
        assert!(
            analysis.adjusted_semantic_level >= previous,
            "shared={shared}: {} < {previous}",
            analysis.adjusted_semantic_level
        );
        previous = analysis.adjusted_semantic_level;
    }
    assert!(previous > 0.0);
}

#[test]
fn low_content_boundary_is_ten_tokens() {
    let a = analyzer();
    let words = [
        "model", "klasifikasi", "teks", "otomatis", "memakai", "jaringan", "saraf",
        "konvolusional", "korpus", "berita",
    ];
    let ten = words.join(" ");
    let nine = words[..9].join(" ");

    let analysis = a.analyze(&ten, &ten);
    assert!(!analysis.low_content);
    assert_eq!(analysis.final_score, analysis.weighted_score);

    let analysis = a.analyze(&nine, &ten);
    assert!(analysis.low_content);
    assert!((analysis.final_score - analysis.weighted_score * 0.7).abs() < 1e-12);
}

#[test]
fn scores_stay_in_range() {
    let a = analyzer();
    for x in SAMPLES {
        for y in SAMPLES {
            let r = a.analyze(x, y);
            for level in [
                r.character_level,
                r.word_level,
                r.semantic_level,
                r.structural_level,
                r.entity_filtered,
                r.content_quality,
            ] {
                assert!((0.0..=1.0).contains(&level), "{x:?} / {y:?}: {r:?}");
            }
            assert!(r.final_score >= 0.0 && r.final_score <= r.weighted_score + 1e-12);
        }
    }
}
