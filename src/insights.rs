//! Turns scores and excerpts into explanations and recommendations.
//!
//! Everything here is a pure function of its inputs. Wording is selected by
//! [`Locale`]; thresholds are the same in every language.

use std::fmt;
use std::str::FromStr;

use matcher::ExcerptMatch;
use serde::{Deserialize, Serialize};
use similarity::SimilarityAnalysis;

use crate::contact::ContactAnalysis;
use crate::report::percent;

/// Language of generated report text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "id")]
    Indonesian,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "id" | "indonesian" => Ok(Locale::Indonesian),
            other => Err(format!("unsupported locale '{other}' (expected en or id)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::English => "en",
            Locale::Indonesian => "id",
        })
    }
}

/// How sure the report is that the similarity reflects copying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl Confidence {
    /// Thresholds at 0.8, 0.6 and 0.4 on the semantic level.
    pub fn from_semantic(level: f64) -> Self {
        if level > 0.8 {
            Confidence::VeryHigh
        } else if level > 0.6 {
            Confidence::High
        } else if level > 0.4 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelBreakdown {
    pub score: u32,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityBreakdown {
    pub word_level: LevelBreakdown,
    pub semantic_level: LevelBreakdown,
    pub structural_level: LevelBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub excerpt_analysis: String,
    pub contact_filtering_info: String,
}

/// Generated narrative part of a detection report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedInsights {
    pub confidence: Confidence,
    pub entity_analysis: String,
    pub semantic_assessment: String,
    pub detailed_explanation: String,
    pub specific_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub similarity_breakdown: SimilarityBreakdown,
    pub content_analysis: ContentAnalysis,
}

/// Inputs to [`generate_insights`].
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub analysis: &'a SimilarityAnalysis,
    pub excerpts: &'a [ExcerptMatch],
    pub contacts: &'a ContactAnalysis,
    /// Entity mentions recognized in the target document.
    pub target_entities: usize,
    pub source_label: &'a str,
    pub locale: Locale,
}

/// Excerpt counts in the >80% and 60-80% similarity bands.
pub fn excerpt_bands(excerpts: &[ExcerptMatch]) -> (usize, usize) {
    let high = excerpts.iter().filter(|e| e.similarity_percent > 80).count();
    let moderate = excerpts
        .iter()
        .filter(|e| e.similarity_percent > 60 && e.similarity_percent <= 80)
        .count();
    (high, moderate)
}

pub fn generate_insights(ctx: &InsightContext<'_>) -> AdvancedInsights {
    let semantic = ctx.analysis.semantic_level;
    let confidence = Confidence::from_semantic(semantic);
    let (semantic_assessment, specific_findings) =
        semantic_assessment(confidence, percent(semantic), ctx.locale);

    AdvancedInsights {
        confidence,
        entity_analysis: entity_analysis(ctx.target_entities, ctx.locale),
        semantic_assessment,
        detailed_explanation: detailed_explanation(ctx),
        specific_findings,
        recommendations: recommendations(ctx),
        similarity_breakdown: similarity_breakdown(ctx.analysis, ctx.locale),
        content_analysis: content_analysis(ctx.excerpts, ctx.contacts, ctx.locale),
    }
}

fn entity_analysis(count: usize, locale: Locale) -> String {
    match locale {
        Locale::English => format!(
            "Detected {count} named entities (people, places, organizations) that were filtered out of the plagiarism analysis"
        ),
        Locale::Indonesian => format!(
            "Terdeteksi {count} entitas bernama (nama orang, tempat, organisasi) yang difilter dari analisis plagiarisme"
        ),
    }
}

fn semantic_assessment(confidence: Confidence, pct: u32, locale: Locale) -> (String, Vec<String>) {
    let (assessment, findings): (String, [&str; 2]) = match (locale, confidence) {
        (Locale::English, Confidence::VeryHigh) => (
            format!("Very high semantic similarity ({pct}%) - most likely copied directly with light paraphrasing"),
            [
                "Sentence structure is almost identical to the source",
                "The same terms and terminology are used verbatim",
            ],
        ),
        (Locale::English, Confidence::High) => (
            format!("High semantic similarity ({pct}%) - significant content overlap"),
            [
                "Main concepts and ideas closely mirror the source",
                "Information is presented in the same order as the source",
            ],
        ),
        (Locale::English, Confidence::Medium) => (
            format!("Moderate semantic similarity ({pct}%) - some shared concepts and ideas"),
            [
                "Some main concepts are shared",
                "A few technical phrases or terms are shared",
            ],
        ),
        (Locale::English, Confidence::Low) => (
            format!("Low semantic similarity ({pct}%) - the content appears original"),
            [
                "The content shows good originality",
                "The approach and perspective differ from the source",
            ],
        ),
        (Locale::Indonesian, Confidence::VeryHigh) => (
            format!("Kesamaan semantik sangat tinggi ({pct}%) - kemungkinan besar hasil penyalinan langsung dengan sedikit parafrase"),
            [
                "Struktur kalimat hampir identik dengan sumber",
                "Penggunaan istilah dan terminologi yang sama persis",
            ],
        ),
        (Locale::Indonesian, Confidence::High) => (
            format!("Kesamaan semantik tinggi ({pct}%) - terdapat tumpang tindih konten yang signifikan"),
            [
                "Konsep dan ide utama sangat mirip dengan sumber",
                "Urutan penyajian informasi mengikuti pola yang sama",
            ],
        ),
        (Locale::Indonesian, Confidence::Medium) => (
            format!("Kesamaan semantik sedang ({pct}%) - beberapa konsep dan ide yang sama"),
            [
                "Terdapat beberapa kesamaan dalam konsep utama",
                "Beberapa frasa atau terminologi teknis yang sama",
            ],
        ),
        (Locale::Indonesian, Confidence::Low) => (
            format!("Kesamaan semantik rendah ({pct}%) - konten tampak original"),
            [
                "Konten menunjukkan originalitas yang baik",
                "Pendekatan dan sudut pandang yang berbeda dari sumber",
            ],
        ),
    };
    (assessment, findings.iter().map(|f| f.to_string()).collect())
}

/// Explanation listing the sub-scores above their disclosure thresholds.
pub fn detailed_explanation(ctx: &InsightContext<'_>) -> String {
    let analysis = ctx.analysis;
    let en = ctx.locale == Locale::English;
    let pct = percent(analysis.final_score);
    let mut text = if en {
        format!(
            "A similarity of {pct}% with document \"{}\" comes from the following factors:\n\n",
            ctx.source_label
        )
    } else {
        format!(
            "Tingkat kesamaan {pct}% dengan dokumen \"{}\" disebabkan oleh kombinasi faktor berikut:\n\n",
            ctx.source_label
        )
    };

    if analysis.word_level > 0.5 {
        let word = percent(analysis.word_level);
        text.push_str(&if en {
            format!("• **Word-level similarity ({word}%)**: nearly identical words and phrases. ")
        } else {
            format!("• **Kesamaan Tingkat Kata ({word}%)**: Penggunaan kata-kata dan frasa yang hampir identik. ")
        });
        text.push_str(match (en, analysis.word_level > 0.8) {
            (true, true) => "This points to direct copying without adequate paraphrasing.\n",
            (true, false) => "There is significant overlap in word choice and terminology.\n",
            (false, true) => "Ini menunjukkan kemungkinan penyalinan langsung tanpa parafrase yang memadai.\n",
            (false, false) => "Terdapat overlap signifikan dalam pemilihan kata dan terminologi.\n",
        });
    }

    if analysis.semantic_level > 0.4 {
        let semantic = percent(analysis.semantic_level);
        text.push_str(&if en {
            format!("• **Semantic similarity ({semantic}%)**: shared meaning and main concepts. ")
        } else {
            format!("• **Kesamaan Semantik ({semantic}%)**: Kesamaan makna dan konsep utama. ")
        });
        text.push_str(match (en, analysis.semantic_level > 0.7) {
            (true, true) => "The main ideas are expressed in a very similar way.\n",
            (true, false) => "Some concepts and ways of presenting ideas are shared.\n",
            (false, true) => "Ide-ide utama disampaikan dengan cara yang sangat mirip.\n",
            (false, false) => "Beberapa konsep dan pendekatan yang sama dalam menyampaikan ide.\n",
        });
    }

    if analysis.structural_level > 0.6 {
        let structural = percent(analysis.structural_level);
        text.push_str(&if en {
            format!("• **Structural similarity ({structural}%)**: similar organization and flow of information.\n")
        } else {
            format!("• **Kesamaan Struktur ({structural}%)**: Pola organisasi dan alur penyajian informasi yang mirip.\n")
        });
    }

    let (high, moderate) = excerpt_bands(ctx.excerpts);
    if high > 0 {
        text.push_str(&if en {
            format!("• **Identical phrasing**: {high} sentences with more than 80% similarity point to direct copying.\n")
        } else {
            format!("• **Frasa Identik**: Ditemukan {high} kalimat dengan kesamaan >80% yang menunjukkan kemungkinan penyalinan langsung.\n")
        });
    }
    if moderate > 0 {
        text.push_str(&if en {
            format!("• **Minimal paraphrasing**: {moderate} sentences are not paraphrased enough (60-80% similarity).\n")
        } else {
            format!("• **Parafrase Minimal**: Terdapat {moderate} kalimat dengan parafrase yang tidak memadai (60-80% kesamaan).\n")
        });
    }

    text
}

fn interpretation(level: f64, texts: [&str; 3]) -> String {
    let text = if level > 0.7 {
        texts[0]
    } else if level > 0.5 {
        texts[1]
    } else {
        texts[2]
    };
    text.to_string()
}

pub fn similarity_breakdown(analysis: &SimilarityAnalysis, locale: Locale) -> SimilarityBreakdown {
    let (word, semantic, structural) = match locale {
        Locale::English => (
            [
                "Word usage is nearly identical",
                "Many of the same words are used",
                "Word choice is fairly different",
            ],
            [
                "Meaning and concepts are nearly the same",
                "The main ideas are similar",
                "Approach and ideas are fairly different",
            ],
            [
                "Presentation structure is very similar",
                "Information is organized in a similar pattern",
                "Presentation structure differs",
            ],
        ),
        Locale::Indonesian => (
            [
                "Penggunaan kata hampir identik",
                "Banyak kata yang sama digunakan",
                "Pemilihan kata cukup berbeda",
            ],
            [
                "Makna dan konsep hampir sama",
                "Ide utama memiliki kesamaan",
                "Pendekatan dan ide cukup berbeda",
            ],
            [
                "Struktur penyajian sangat mirip",
                "Pola organisasi informasi serupa",
                "Struktur penyajian berbeda",
            ],
        ),
    };

    SimilarityBreakdown {
        word_level: LevelBreakdown {
            score: percent(analysis.word_level),
            interpretation: interpretation(analysis.word_level, word),
        },
        semantic_level: LevelBreakdown {
            score: percent(analysis.semantic_level),
            interpretation: interpretation(analysis.semantic_level, semantic),
        },
        structural_level: LevelBreakdown {
            score: percent(analysis.structural_level),
            interpretation: interpretation(analysis.structural_level, structural),
        },
    }
}

pub fn content_analysis(
    excerpts: &[ExcerptMatch],
    contacts: &ContactAnalysis,
    locale: Locale,
) -> ContentAnalysis {
    let en = locale == Locale::English;
    let excerpt_analysis = if excerpts.is_empty() {
        if en {
            "No passages with significant similarity (>60%) were found.".to_string()
        } else {
            "Tidak ditemukan bagian konten dengan kesamaan yang signifikan (>60%).".to_string()
        }
    } else {
        let (high, moderate) = excerpt_bands(excerpts);
        let mut parts = Vec::new();
        if high > 0 {
            parts.push(if en {
                format!("{high} with very high similarity (>80%)")
            } else {
                format!("{high} bagian dengan kesamaan sangat tinggi (>80%)")
            });
        }
        if moderate > 0 {
            parts.push(if en {
                format!("{moderate} with moderate similarity (60-80%)")
            } else {
                format!("{moderate} bagian dengan kesamaan sedang (60-80%)")
            });
        }
        let head = if en {
            format!(
                "Content analysis found {} passages with significant similarity",
                excerpts.len()
            )
        } else {
            format!(
                "Analisis konten menunjukkan {} bagian dengan kesamaan signifikan",
                excerpts.len()
            )
        };
        if parts.is_empty() {
            format!("{head}.")
        } else {
            format!("{head}: {}.", parts.join(", "))
        }
    };

    ContentAnalysis {
        excerpt_analysis,
        contact_filtering_info: contacts.details.join(". "),
    }
}

/// Recommendations for the final-score band, plus a pointer to the most
/// similar excerpt when it exceeds 85%.
pub fn recommendations(ctx: &InsightContext<'_>) -> Vec<String> {
    let score = ctx.analysis.final_score;
    let en = ctx.locale == Locale::English;
    let mut out: Vec<String> = Vec::new();
    let mut push = |english: &str, indonesian: &str| {
        out.push(if en { english } else { indonesian }.to_string());
    };

    if score > 0.7 {
        push(
            "**Paraphrase thoroughly**: rewrite every similar passage with genuinely different words and sentence structure",
            "**Parafrase Menyeluruh**: Tulis ulang semua bagian yang mirip dengan menggunakan kata-kata dan struktur kalimat yang benar-benar berbeda",
        );
        push(
            "**Add original analysis**: include your own interpretation, analysis or perspective on the topic",
            "**Tambah Analisis Original**: Sertakan interpretasi, analisis, atau sudut pandang pribadi Anda terhadap topik tersebut",
        );
        push(
            "**Cite properly**: make sure every idea taken from another source is cited in the appropriate academic format",
            "**Sitasi yang Tepat**: Pastikan semua ide yang berasal dari sumber lain diberi kutipan yang sesuai dengan format akademik",
        );
        if ctx.analysis.semantic_level > 0.8 {
            push(
                "**High priority**: the content needs substantial rewriting to avoid a plagiarism finding",
                "**Prioritas Tinggi**: Konten perlu ditulis ulang secara signifikan untuk menghindari tuduhan plagiarisme",
            );
        }
    } else if score > 0.4 {
        push(
            "**Improve paraphrasing**: use synonyms, restructure sentences and vary how ideas are expressed",
            "**Perbaiki Parafrase**: Gunakan sinonim, ubah struktur kalimat, dan variasikan cara penyampaian ide",
        );
        push(
            "**Add references**: cite every source you draw on clearly",
            "**Tambah Referensi**: Berikan kutipan yang jelas untuk semua sumber yang dirujuk",
        );
        push(
            "**Focus on originality**: add more original content and personal analysis",
            "**Fokus Originalitas**: Tambahkan lebih banyak konten original dan analisis pribadi",
        );
        if ctx.excerpts.len() > 3 {
            push(
                "**Special attention**: several passages need better paraphrasing",
                "**Perhatian Khusus**: Terdapat beberapa bagian yang perlu parafrase lebih baik",
            );
        }
    } else {
        push(
            "**Good originality**: keep up this writing standard",
            "**Tingkat Originalitas Baik**: Pertahankan standar penulisan yang sudah baik ini",
        );
        push(
            "**Keep citing**: continue citing the sources you refer to",
            "**Terus Sitasi**: Lanjutkan memberikan kutipan yang tepat untuk sumber yang dirujuk",
        );
        push(
            "**Develop further**: add more perspectives or original analysis to enrich the content",
            "**Kembangkan Lebih**: Tambahkan lebih banyak perspektif atau analisis original untuk memperkaya konten",
        );
    }

    // first excerpt wins ties
    let top = ctx
        .excerpts
        .iter()
        .rev()
        .max_by_key(|e| e.similarity_percent);
    if let Some(top) = top.filter(|e| e.similarity_percent > 85) {
        out.push(if en {
            format!(
                "**Priority passage**: the sentence \"{}\" is {}% similar and should be rewritten completely",
                top.target_sentence, top.similarity_percent
            )
        } else {
            format!(
                "**Bagian Prioritas**: Kalimat \"{}\" memiliki kesamaan {}% dan perlu ditulis ulang sepenuhnya",
                top.target_sentence, top.similarity_percent
            )
        });
    }

    out
}
