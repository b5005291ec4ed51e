//! Word lists, entity names and rule tables shared by every analysis stage.
//!
//! A [`Lexicon`] is immutable once built. Build the default one with
//! [`Lexicon::builtin`], extend it with [`LexiconBuilder`], and share it across
//! threads behind an `Arc`.
//!
//! ```rust
//! use canonical::{EntityKind, Lexicon};
//!
//! let lexicon = Lexicon::builder()
//!     .person("ratna")
//!     .stop_word("tersebut")
//!     .build()
//!     .unwrap();
//! assert_eq!(lexicon.entity_kind("ratna"), Some(EntityKind::Person));
//! assert!(lexicon.is_stop_word("yang"));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::EntityKind;
use crate::error::LexiconError;
use crate::rules::{RuleTable, BUILTIN_RULES};

const STOP_WORDS: &[&str] = &[
    // Indonesian
    "yang", "dan", "atau", "dengan", "untuk", "dari", "dalam", "pada", "ke", "di", "oleh",
    "sebagai", "adalah", "merupakan", "akan", "dapat", "harus", "perlu", "bisa", "ada",
    "tidak", "juga", "telah", "sudah", "masih", "lebih", "sangat", "cukup", "agak", "ini",
    "itu", "tersebut", "serta", "yaitu", "yakni", "ialah", "karena", "sehingga", "maka",
    // English
    "the", "and", "or", "of", "to", "in", "for", "with", "by", "as", "is", "are", "was",
    "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "this", "that", "these", "those", "a", "an",
    // Academic
    "menurut", "berdasarkan", "sesuai", "seperti", "misalnya", "contoh", "hasil", "penelitian",
    "according", "based", "such", "example", "result", "study", "research", "analysis",
    // Technical
    "nilai", "data", "sistem", "fungsi", "metode", "proses", "informasi", "komputer", "digital",
    "analisis", "algoritma", "input", "output", "struktur", "implementasi", "aplikasi",
    "value", "system", "function", "method", "process", "information", "computer",
    "algorithm", "structure", "implementation", "application", "menggunakan", "using",
    "digunakan", "used", "teknologi", "technology", "pembelajaran", "learning", "siswa",
    "student", "sekolah", "school", "menengah", "atas", "dampak", "impact", "terhadap",
    "towards",
    // Document structure
    "bab", "pendahuluan", "kesimpulan", "pembahasan", "tinjauan", "pustaka", "daftar",
    "chapter", "introduction", "conclusion", "discussion", "review", "literature", "references",
    "kebutuhan", "fungsional", "requirement", "functional", "specification",
];

const PERSON_NAMES: &[&str] = &[
    "ahmad", "muhammad", "abdul", "siti", "sri", "dewi", "putra", "putri", "budi", "andi",
    "wati", "ningsih", "yanto", "yani", "rini", "indah", "sari", "lestari", "agus", "bambang",
    "hendro", "sutrisno", "widodo", "susilo", "joko", "megawati", "prabowo", "wiranto",
    "john", "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis",
    "rodriguez", "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas",
    "taylor", "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris",
    "clark", "lewis", "robinson", "walker", "young", "allen", "king", "wright", "scott",
];

const PLACE_NAMES: &[&str] = &[
    "jakarta", "surabaya", "bandung", "medan", "semarang", "makassar", "palembang", "tangerang",
    "depok", "bekasi", "bogor", "batam", "pekanbaru", "bandar lampung", "malang", "denpasar",
    "indonesia", "america", "europe", "asia", "africa", "australia", "london", "paris", "tokyo",
    "singapore", "malaysia", "thailand", "vietnam", "philippines", "brunei", "myanmar",
];

const ORGANIZATION_NAMES: &[&str] = &[
    "universitas", "institut", "sekolah", "fakultas", "jurusan", "department", "college",
    "university", "school", "faculty", "google", "microsoft", "apple", "facebook", "amazon",
    "unesco", "who", "unicef", "nasa", "fbi", "cia", "ieee", "acm",
];

const SYNONYM_GROUPS: &[&[&str]] = &[
    &["baik", "bagus", "good", "excellent", "great"],
    &["buruk", "jelek", "bad", "poor", "terrible"],
    &["besar", "banyak", "large", "big", "huge"],
    &["kecil", "sedikit", "small", "little", "tiny"],
    &["penting", "vital", "important", "crucial", "essential"],
    &["penelitian", "riset", "research", "study", "investigation"],
    &["hasil", "outcome", "result", "finding", "conclusion"],
    &["metode", "cara", "method", "approach", "technique"],
    &["analisis", "kajian", "analysis", "examination", "evaluation"],
];

const COMMON_PHRASES: &[&str] = &[
    "dalam hal ini",
    "berdasarkan hasil",
    "dapat disimpulkan",
    "menurut penelitian",
    "in this case",
    "based on results",
    "can be concluded",
    "according to research",
    "dari hasil penelitian",
    "hasil penelitian menunjukkan",
    "dapat dilihat bahwa",
    "research shows that",
    "the results show",
    "it can be seen that",
];

const PERSON_INDICATORS: &[&str] = &[
    "dr", "prof", "ir", "drs", "h", "hj", "bapak", "ibu", "pak", "bu", "mr", "mrs", "ms",
];

const PLACE_INDICATORS: &[&str] = &[
    "di", "dari", "ke", "kota", "kabupaten", "provinsi", "negara", "in", "from", "to", "city",
    "country",
];

const ORGANIZATION_INDICATORS: &[&str] = &[
    "universitas", "institut", "sekolah", "perusahaan", "university", "institute", "school",
    "company",
];

/// Serializable lexicon additions, as found in the `lexicon` section of a
/// configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LexiconExtension {
    pub stop_words: Vec<String>,
    pub persons: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
    pub synonym_groups: Vec<Vec<String>>,
    pub common_phrases: Vec<String>,
}

impl LexiconExtension {
    pub fn from_yaml(yaml: &str) -> Result<Self, LexiconError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
            && self.persons.is_empty()
            && self.places.is_empty()
            && self.organizations.is_empty()
            && self.synonym_groups.is_empty()
            && self.common_phrases.is_empty()
    }
}

/// Immutable vocabulary and rule set.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stop_words: FxHashSet<String>,
    entities: FxHashMap<String, EntityKind>,
    synonym_groups: Vec<Vec<String>>,
    common_phrases: Vec<String>,
    person_indicators: FxHashSet<String>,
    place_indicators: FxHashSet<String>,
    organization_indicators: FxHashSet<String>,
    rules: RuleTable,
}

static SHARED: OnceCell<Arc<Lexicon>> = OnceCell::new();

impl Lexicon {
    /// Builds the default lexicon.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::builder().build()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Process-wide default lexicon, built on first use.
    pub fn shared() -> Result<Arc<Lexicon>, LexiconError> {
        SHARED
            .get_or_try_init(|| Lexicon::builtin().map(Arc::new))
            .cloned()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(key(word).as_ref())
    }

    /// Entity kind of a single word or a space-joined multi-word name.
    pub fn entity_kind(&self, name: &str) -> Option<EntityKind> {
        self.entities.get(key(name).as_ref()).copied()
    }

    /// True when both words appear together in one synonym group.
    pub fn same_synonym_group(&self, a: &str, b: &str) -> bool {
        let (a, b) = (key(a), key(b));
        self.synonym_groups.iter().any(|group| {
            group.iter().any(|w| w == a.as_ref()) && group.iter().any(|w| w == b.as_ref())
        })
    }

    /// True when `phrase` contains any stock phrase as a substring.
    pub fn is_common_phrase(&self, phrase: &str) -> bool {
        let phrase = key(phrase);
        self.common_phrases
            .iter()
            .any(|common| phrase.contains(common.as_str()))
    }

    /// True when `word` is a context indicator for `kind`.
    pub fn is_indicator(&self, kind: EntityKind, word: &str) -> bool {
        let set = match kind {
            EntityKind::Person => &self.person_indicators,
            EntityKind::Place => &self.place_indicators,
            EntityKind::Organization => &self.organization_indicators,
        };
        set.contains(key(word).as_ref())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

fn key(word: &str) -> Cow<'_, str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Collects additions on top of the built-in word lists.
///
/// Later entity registrations override earlier ones for the same name, so a
/// name added here wins over the built-in kind.
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    stop_words: Vec<String>,
    entities: Vec<(String, EntityKind)>,
    synonym_groups: Vec<Vec<String>>,
    common_phrases: Vec<String>,
}

impl LexiconBuilder {
    pub fn stop_word(mut self, word: impl Into<String>) -> Self {
        self.stop_words.push(word.into());
        self
    }

    pub fn entity(mut self, name: impl Into<String>, kind: EntityKind) -> Self {
        self.entities.push((name.into(), kind));
        self
    }

    pub fn person(self, name: impl Into<String>) -> Self {
        self.entity(name, EntityKind::Person)
    }

    pub fn place(self, name: impl Into<String>) -> Self {
        self.entity(name, EntityKind::Place)
    }

    pub fn organization(self, name: impl Into<String>) -> Self {
        self.entity(name, EntityKind::Organization)
    }

    pub fn synonym_group<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonym_groups
            .push(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn common_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.common_phrases.push(phrase.into());
        self
    }

    /// Applies every addition in `ext`.
    pub fn extend(mut self, ext: &LexiconExtension) -> Self {
        self.stop_words.extend(ext.stop_words.iter().cloned());
        for (names, kind) in [
            (&ext.persons, EntityKind::Person),
            (&ext.places, EntityKind::Place),
            (&ext.organizations, EntityKind::Organization),
        ] {
            self.entities
                .extend(names.iter().map(|name| (name.clone(), kind)));
        }
        self.synonym_groups
            .extend(ext.synonym_groups.iter().cloned());
        self.common_phrases
            .extend(ext.common_phrases.iter().cloned());
        self
    }

    pub fn build(self) -> Result<Lexicon, LexiconError> {
        let mut stop_words: FxHashSet<String> =
            STOP_WORDS.iter().map(|w| w.to_string()).collect();
        for word in self.stop_words {
            stop_words.insert(normalized_entry(&word, "stop words")?);
        }

        let mut entities = FxHashMap::default();
        let builtin = [
            (PERSON_NAMES, EntityKind::Person),
            (PLACE_NAMES, EntityKind::Place),
            (ORGANIZATION_NAMES, EntityKind::Organization),
        ];
        for (names, kind) in builtin {
            for name in names {
                entities.insert(name.to_string(), kind);
            }
        }
        for (name, kind) in self.entities {
            entities.insert(normalized_entry(&name, "entities")?, kind);
        }

        let mut synonym_groups: Vec<Vec<String>> = SYNONYM_GROUPS
            .iter()
            .map(|group| group.iter().map(|w| w.to_string()).collect())
            .collect();
        for (idx, group) in self.synonym_groups.into_iter().enumerate() {
            if group.len() < 2 {
                return Err(LexiconError::DegenerateSynonymGroup(idx));
            }
            let group = group
                .iter()
                .map(|w| normalized_entry(w, "synonym groups"))
                .collect::<Result<Vec<_>, _>>()?;
            synonym_groups.push(group);
        }

        let mut common_phrases: Vec<String> =
            COMMON_PHRASES.iter().map(|p| p.to_string()).collect();
        for phrase in self.common_phrases {
            common_phrases.push(normalized_entry(&phrase, "common phrases")?);
        }

        let rules = RuleTable::compile(BUILTIN_RULES)?;
        debug!(
            stop_words = stop_words.len(),
            entities = entities.len(),
            synonym_groups = synonym_groups.len(),
            rules = rules.len(),
            "lexicon_built"
        );

        Ok(Lexicon {
            stop_words,
            entities,
            synonym_groups,
            common_phrases,
            person_indicators: to_set(PERSON_INDICATORS),
            place_indicators: to_set(PLACE_INDICATORS),
            organization_indicators: to_set(ORGANIZATION_INDICATORS),
            rules,
        })
    }
}

fn normalized_entry(raw: &str, list: &'static str) -> Result<String, LexiconError> {
    let entry = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if entry.is_empty() {
        return Err(LexiconError::EmptyEntry(list));
    }
    Ok(entry.to_lowercase())
}

fn to_set(words: &[&str]) -> FxHashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}
