//! Declarative pattern rules used by the normalizer and the downstream matchers.
//!
//! Every regex the analysis core relies on lives in one table. A rule belongs to
//! a [`RuleStage`], and rules inside a stage are evaluated in the order they are
//! declared in [`BUILTIN_RULES`]. Replacement rules rewrite their match into a
//! placeholder tag; match-only rules are used as predicates.
//!
//! Replacement tags are padded with spaces so that a tag never fuses with an
//! adjacent word. Whitespace is collapsed at the end of normalization, so the
//! padding never reaches the output.

use regex::Regex;
use serde::Serialize;

use crate::error::LexiconError;

/// Pipeline stage a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStage {
    /// Contact details (emails, URLs, phone numbers, contact labels).
    Contact,
    /// Document-structure boilerplate (headers, lists, page/table references).
    Structure,
    /// Numeric and citation normalization, applied to case-folded text.
    Reference,
    /// Residual punctuation, stripped before whitespace is collapsed.
    Punctuation,
    /// Joined n-gram windows that carry no content of their own.
    NgramBoilerplate,
    /// Stock academic phrasing that inflates sentence similarity.
    AcademicPhrasing,
    /// Title and particle patterns that link two tokens into a person name.
    NameLink,
}

/// Static description of a rule, compiled into a [`PatternRule`].
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub stage: RuleStage,
    pub pattern: &'static str,
    pub replacement: Option<&'static str>,
}

const fn replace(
    name: &'static str,
    stage: RuleStage,
    pattern: &'static str,
    replacement: &'static str,
) -> RuleSpec {
    RuleSpec {
        name,
        stage,
        pattern,
        replacement: Some(replacement),
    }
}

const fn detect(name: &'static str, stage: RuleStage, pattern: &'static str) -> RuleSpec {
    RuleSpec {
        name,
        stage,
        pattern,
        replacement: None,
    }
}

use RuleStage::{
    AcademicPhrasing, Contact, NameLink, NgramBoilerplate, Punctuation, Reference, Structure,
};

/// The built-in rule table, in evaluation order.
pub const BUILTIN_RULES: &[RuleSpec] = &[
    // Stage 1: contact information.
    replace(
        "email",
        Contact,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        " [EMAIL] ",
    ),
    replace(
        "url",
        Contact,
        r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
        " [URL] ",
    ),
    replace(
        "phone",
        Contact,
        r"(?:\+62|62|0)[0-9]{9,13}|(?:\(\d{2,4}\)|\d{2,4})[\s-]?\d{3,4}[\s-]?\d{3,4}",
        " [PHONE] ",
    ),
    replace(
        "contact_label",
        Contact,
        r"(?i)\b(?:email|e-mail|phone|tel|hp|wa|whatsapp|contact|kontak|hubungi)[\s:]+\S+",
        " [CONTACT] ",
    ),
    // Stage 2: document structure.
    replace(
        "chapter_heading",
        Structure,
        r"(?im)^\s*(?:bab|chapter)\s+[ivx\d]+\s*[:.\-]?\s*(?:pendahuluan|introduction|kesimpulan|conclusion|pembahasan|discussion|tinjauan|review)",
        " [STRUCTURE] ",
    ),
    replace(
        "numbered_list",
        Structure,
        r"(?m)^\s*[\d.)(\-*+•]+\s+",
        " [STRUCTURE] ",
    ),
    replace(
        "letter_list",
        Structure,
        r"(?m)^\s*[a-zA-Z][.)\-]\s+",
        " [STRUCTURE] ",
    ),
    replace(
        "roman_list",
        Structure,
        r"(?m)^\s*[IVX]+[.)\-]\s+",
        " [STRUCTURE] ",
    ),
    replace(
        "page_reference",
        Structure,
        r"(?i)\b(?:halaman|page|hal\.?)\s+\d+",
        " [STRUCTURE] ",
    ),
    replace(
        "table_reference",
        Structure,
        r"(?i)\b(?:tabel|table|gambar|figure|grafik|chart)\s+[\d.\-]+",
        " [STRUCTURE] ",
    ),
    replace(
        "formula",
        Structure,
        r"(?i)\b(?:nilai\s+akhir|final\s+value)\s*=\s*[()+\-*/\w\s]{1,50}",
        " [STRUCTURE] ",
    ),
    replace(
        "formatting",
        Structure,
        r"(?i)\b(?:font|size|margin|spacing|alignment|justify|center|left|right|bold|italic)\b",
        " [STRUCTURE] ",
    ),
    replace(
        "chapter_header",
        Structure,
        r"(?im)^\s*(?:bab|chapter)\s+[ivx\d]+\b\s*",
        " [CHAPTER_HEADER] ",
    ),
    replace(
        "section_header",
        Structure,
        r"(?m)^[ \t]*\d+\.\d+[ \t]+[A-Za-z \t]+$",
        " [SECTION_HEADER] ",
    ),
    replace(
        "requirement_header",
        Structure,
        r"(?i)\b\d+\s+(?:kebutuhan|requirement)\s+(?:fungsional|functional)\b",
        " [REQUIREMENT_HEADER] ",
    ),
    replace(
        "standard_section",
        Structure,
        r"(?i)\b(?:latar\s+belakang|background|pendahuluan|introduction)\b",
        " [STANDARD_SECTION] ",
    ),
    replace(
        "chapter_reference",
        Structure,
        r"(?i)\b\d+\s+(?:bab|chapter)\s+[ivx\d]+\b",
        " [CHAPTER_REF] ",
    ),
    // Stage 4: numbers, citations and references over case-folded text.
    replace("citation", Reference, r"\([^)]*\d{4}[^)]*\)", " "),
    replace("bracket_citation", Reference, r"\[\d+\]", " "),
    replace("year", Reference, r"\b\d{4}\b", " [YEAR] "),
    replace(
        "percentage",
        Reference,
        r"\b\d+(?:\.\d+)?%",
        " [PERCENTAGE] ",
    ),
    replace("number", Reference, r"\b\d+(?:\.\d+)?\b", " [NUMBER] "),
    replace(
        "figure_reference",
        Reference,
        r"(?i)\b(?:tabel|table|gambar|figure|grafik|chart)\s+(?:\[(?:NUMBER|YEAR)\]|[\d.\-]+)",
        " [REFERENCE] ",
    ),
    replace(
        "page",
        Reference,
        r"(?i)\b(?:halaman|page|hal\.?)\s+(?:\[(?:NUMBER|YEAR)\]|\d+)",
        " [PAGE] ",
    ),
    replace(
        "section",
        Reference,
        r"(?i)\b(?:bab|chapter|pasal)\s+(?:\[(?:NUMBER|YEAR)\]|[\divx]+\b)",
        " [SECTION] ",
    ),
    replace(
        "formula",
        Reference,
        r"(?i)\b(?:nilai\s+akhir|final\s+value)\s*=\s*[()+\-*/\w\s×·]{1,50}",
        " [FORMULA] ",
    ),
    replace(
        "similarity_function",
        Reference,
        r"(?i)\b(?:sim|similarity|kesamaan)\s*[(\[]\s*[a-z]\s*,\s*[a-z]\s*[)\]]",
        " [SIMILARITY_FUNCTION] ",
    ),
    replace("numbered_list", Reference, r"(?m)^\s*[\d.)(\-*+•]+\s+", " "),
    replace("letter_list", Reference, r"(?m)^\s*[a-zA-Z][.)\-]\s+", " "),
    replace("roman_list", Reference, r"(?im)^\s*[ivx]+[.)\-]\s+", " "),
    replace(
        "fragmented",
        Reference,
        r"\b\w\s+\w\s+\w\b",
        " [FRAGMENTED] ",
    ),
    replace(
        "variable",
        Reference,
        r"\b[a-z]\s*:\s*(?:\[NUMBER\]|\d+\b)",
        " [VARIABLE] ",
    ),
    // Everything but word characters, whitespace and tag brackets.
    replace("punctuation", Punctuation, r"[^\w\s\[\]]+", " "),
    // Smart n-gram boilerplate windows (matched against the lower-cased window).
    detect(
        "all_placeholders",
        NgramBoilerplate,
        r"^(?:\[[^\]]*\]\s*)+$",
    ),
    detect(
        "leading_connector",
        NgramBoilerplate,
        r"^(?:dan|atau|dengan|untuk|dari|dalam|pada|ke|di|oleh|yang|the|and|or|of|to|in|for|with|by)\s+",
    ),
    detect(
        "trailing_copula",
        NgramBoilerplate,
        r"\s+(?:adalah|merupakan|akan|dapat|harus|perlu|is|are|was|were|be|been|have|has|had)$",
    ),
    detect("list_numbering", NgramBoilerplate, r"^\d+[.)\-]\s+"),
    detect(
        "document_reference",
        NgramBoilerplate,
        r"(?i)^(?:bab|chapter|tabel|table|gambar|figure|halaman|page)\s+\d+",
    ),
    // Stock academic phrasing in Indonesian and English.
    detect(
        "based_on_research",
        AcademicPhrasing,
        r"(?i)berdasarkan hasil.*penelitian",
    ),
    detect("can_be_concluded_id", AcademicPhrasing, r"(?i)dapat disimpulkan bahwa"),
    detect(
        "results_show_id",
        AcademicPhrasing,
        r"(?i)menurut.*hasil.*menunjukkan",
    ),
    detect("based_on_results", AcademicPhrasing, r"(?i)based on.*results"),
    detect("according_to_research", AcademicPhrasing, r"(?i)according to.*research"),
    detect("can_be_concluded_en", AcademicPhrasing, r"(?i)it can be concluded"),
    // Two-token person name links.
    detect("academic_title", NameLink, r"(?i)^(?:dr|prof|ir|drs|h|hj)\.?\s"),
    detect("arabic_connector", NameLink, r"(?i)\b(?:bin|binti|al)\b"),
    detect("particle_connector", NameLink, r"(?i)\b(?:van|de|da|al)\b"),
];

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: &'static str,
    stage: RuleStage,
    regex: Regex,
    replacement: Option<&'static str>,
}

impl PatternRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, LexiconError> {
        let regex = Regex::new(spec.pattern).map_err(|source| LexiconError::InvalidPattern {
            rule: spec.name.to_string(),
            source,
        })?;
        Ok(Self {
            name: spec.name,
            stage: spec.stage,
            regex,
            replacement: spec.replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage(&self) -> RuleStage {
        self.stage
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn replacement(&self) -> Option<&'static str> {
        self.replacement
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Applies the rule. Match-only rules return the input unchanged.
    pub fn apply(&self, text: &str) -> String {
        match self.replacement {
            Some(tag) => self.regex.replace_all(text, tag).into_owned(),
            None => text.to_string(),
        }
    }

    /// All literal matches of this rule in `text`, in order of appearance.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Ordered collection of compiled rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<PatternRule>,
}

impl RuleTable {
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, LexiconError> {
        let rules = specs
            .iter()
            .map(PatternRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn builtin() -> Result<Self, LexiconError> {
        Self::compile(BUILTIN_RULES)
    }

    /// Rules of one stage, in declaration order.
    pub fn stage(&self, stage: RuleStage) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().filter(move |rule| rule.stage == stage)
    }

    /// First rule of `stage` named `name`.
    pub fn get(&self, stage: RuleStage, name: &str) -> Option<&PatternRule> {
        self.stage(stage).find(|rule| rule.name == name)
    }

    /// Runs every replacement rule of `stage` over `text`, each on the output
    /// of the previous one.
    pub fn apply_stage(&self, stage: RuleStage, text: &str) -> String {
        self.stage(stage)
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }

    /// True when any match-only or replacement rule of `stage` matches.
    pub fn any_match(&self, stage: RuleStage, text: &str) -> bool {
        self.stage(stage).any(|rule| rule.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::builtin().expect("builtin rules compile")
    }

    #[test]
    fn every_builtin_rule_compiles() {
        let table = table();
        assert_eq!(table.len(), BUILTIN_RULES.len());
    }

    #[test]
    fn contact_rules_replace_in_declaration_order() {
        let table = table();
        let out = table.apply_stage(
            RuleStage::Contact,
            "mail me at budi@kampus.ac.id or see https://www.kampus.ac.id/profil",
        );
        assert!(out.contains("[EMAIL]"));
        assert!(out.contains("[URL]"));
        assert!(!out.contains('@'));
    }

    #[test]
    fn phone_numbers_are_tagged() {
        let table = table();
        let out = table.apply_stage(RuleStage::Contact, "nomor 081234567890 aktif");
        assert_eq!(out.split_whitespace().nth(1), Some("[PHONE]"));
    }

    #[test]
    fn contact_label_swallows_following_token() {
        let table = table();
        let out = table.apply_stage(RuleStage::Contact, "Kontak: budi sekarang");
        assert_eq!(out.split_whitespace().collect::<Vec<_>>(), ["[CONTACT]", "sekarang"]);
    }

    #[test]
    fn structure_rules_tag_lists_and_formatting() {
        let table = table();
        let out = table.apply_stage(RuleStage::Structure, "1. pertama\nteks bold di sini");
        assert!(out.starts_with(" [STRUCTURE] pertama"));
        assert!(out.contains("teks  [STRUCTURE]  di"));
    }

    #[test]
    fn chapter_header_requires_whole_numeral() {
        let table = table();
        let rule = table
            .get(RuleStage::Structure, "chapter_header")
            .expect("rule exists");
        assert!(rule.is_match("BAB IV"));
        assert!(!rule.is_match("bab ini membahas"));
    }

    #[test]
    fn reference_rules_tag_years_before_numbers() {
        let table = table();
        let out = table.apply_stage(RuleStage::Reference, "pada 2021 naik 15% dari 3 titik");
        let tokens: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(
            tokens,
            ["pada", "[YEAR]", "naik", "[PERCENTAGE]", "dari", "[NUMBER]", "titik"]
        );
    }

    #[test]
    fn citations_are_removed() {
        let table = table();
        let out = table.apply_stage(RuleStage::Reference, "hasil ini (smith, 2020) dan [3] lain");
        let tokens: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(tokens, ["hasil", "ini", "dan", "lain"]);
    }

    #[test]
    fn ngram_boilerplate_predicates() {
        let table = table();
        assert!(table.any_match(RuleStage::NgramBoilerplate, "dan metode baru"));
        assert!(table.any_match(RuleStage::NgramBoilerplate, "metode baru adalah"));
        assert!(!table.any_match(RuleStage::NgramBoilerplate, "metode klasifikasi baru"));
    }

    #[test]
    fn match_only_rules_do_not_rewrite() {
        let table = table();
        let rule = table
            .get(RuleStage::AcademicPhrasing, "can_be_concluded_id")
            .expect("rule exists");
        assert!(rule.is_match("Dapat disimpulkan bahwa model bekerja"));
        assert_eq!(rule.apply("dapat disimpulkan bahwa"), "dapat disimpulkan bahwa");
    }
}
