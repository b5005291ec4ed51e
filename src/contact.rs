//! Contact-information audit.
//!
//! Contact details are masked before scoring, so identical e-mail addresses
//! or URLs in both documents never count as copied prose. The audit reports
//! what was masked so a reviewer can see it.

use canonical::{Lexicon, RuleStage};
use serde::{Deserialize, Serialize};

use crate::insights::Locale;

/// Counts of masked contact details across both documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactAnalysis {
    pub emails_filtered: usize,
    pub urls_filtered: usize,
    pub phones_filtered: usize,
    /// Generic `contact:` style labels.
    pub contacts_filtered: usize,
    /// Human-readable notes, one per kind of identical contact found.
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum ContactKind {
    Email,
    Url,
    Phone,
}

impl ContactKind {
    fn rule(self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Url => "url",
            ContactKind::Phone => "phone",
        }
    }

    fn identical_note(self, count: usize, locale: Locale) -> String {
        match (locale, self) {
            (Locale::English, ContactKind::Email) => format!(
                "{count} identical email {} found and excluded from the plagiarism analysis",
                plural(count, "address", "addresses")
            ),
            (Locale::English, ContactKind::Url) => format!(
                "{count} identical {} found and excluded from the plagiarism analysis",
                plural(count, "URL", "URLs")
            ),
            (Locale::English, ContactKind::Phone) => format!(
                "{count} identical phone {} found and excluded from the plagiarism analysis",
                plural(count, "number", "numbers")
            ),
            (Locale::Indonesian, ContactKind::Email) => format!(
                "{count} alamat email identik ditemukan dan diabaikan dari analisis plagiarisme"
            ),
            (Locale::Indonesian, ContactKind::Url) => {
                format!("{count} URL identik ditemukan dan diabaikan dari analisis plagiarisme")
            }
            (Locale::Indonesian, ContactKind::Phone) => format!(
                "{count} nomor telepon identik ditemukan dan diabaikan dari analisis plagiarisme"
            ),
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn matches<'t>(lexicon: &Lexicon, rule: &str, text: &'t str) -> Vec<&'t str> {
    lexicon
        .rules()
        .get(RuleStage::Contact, rule)
        .map(|rule| rule.find_all(text))
        .unwrap_or_default()
}

/// Counts contact details in both raw texts and notes the identical ones.
///
/// A detail in the target counts as identical when the same literal string
/// appears anywhere in the source.
pub fn analyze_contacts(
    target: &str,
    source: &str,
    lexicon: &Lexicon,
    locale: Locale,
) -> ContactAnalysis {
    let mut analysis = ContactAnalysis::default();

    for kind in [ContactKind::Email, ContactKind::Url, ContactKind::Phone] {
        let in_target = matches(lexicon, kind.rule(), target);
        let in_source = matches(lexicon, kind.rule(), source);
        let total = in_target.len() + in_source.len();
        match kind {
            ContactKind::Email => analysis.emails_filtered = total,
            ContactKind::Url => analysis.urls_filtered = total,
            ContactKind::Phone => analysis.phones_filtered = total,
        }

        let identical = in_target.iter().filter(|m| in_source.contains(m)).count();
        if identical > 0 {
            analysis.details.push(kind.identical_note(identical, locale));
        }
    }

    analysis.contacts_filtered = matches(lexicon, "contact_label", target).len()
        + matches(lexicon, "contact_label", source).len();

    if analysis.emails_filtered + analysis.urls_filtered + analysis.phones_filtered == 0 {
        analysis.details.push(match locale {
            Locale::English => "No contact information needed filtering".to_string(),
            Locale::Indonesian => "Tidak ada informasi kontak yang perlu difilter".to_string(),
        });
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn identical_email_is_reported_once() {
        let analysis = analyze_contacts(
            "Kirim ke a@b.com sekarang.",
            "Tanya a@b.com saja.",
            &lexicon(),
            Locale::English,
        );
        assert_eq!(analysis.emails_filtered, 2);
        assert_eq!(
            analysis.details,
            ["1 identical email address found and excluded from the plagiarism analysis"]
        );
    }

    #[test]
    fn indonesian_notes() {
        let analysis = analyze_contacts(
            "lihat https://contoh.org",
            "buka https://contoh.org",
            &lexicon(),
            Locale::Indonesian,
        );
        assert_eq!(analysis.urls_filtered, 2);
        assert_eq!(
            analysis.details,
            ["1 URL identik ditemukan dan diabaikan dari analisis plagiarisme"]
        );
    }

    #[test]
    fn different_contacts_are_counted_but_not_noted() {
        let analysis = analyze_contacts(
            "budi@kampus.ac.id",
            "siti@kampus.ac.id",
            &lexicon(),
            Locale::English,
        );
        assert_eq!(analysis.emails_filtered, 2);
        assert!(analysis.details.is_empty());
    }

    #[test]
    fn no_contacts_gets_a_note() {
        let analysis = analyze_contacts("teks biasa", "teks lain", &lexicon(), Locale::English);
        assert_eq!(analysis.emails_filtered, 0);
        assert_eq!(analysis.urls_filtered, 0);
        assert_eq!(analysis.phones_filtered, 0);
        assert_eq!(analysis.details, ["No contact information needed filtering"]);
    }

    #[test]
    fn contact_labels_are_counted() {
        let analysis = analyze_contacts("kontak: budi", "hubungi saya", &lexicon(), Locale::English);
        assert_eq!(analysis.contacts_filtered, 2);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(ContactAnalysis::default()).unwrap();
        assert!(json.get("emailsFiltered").is_some());
        assert!(json.get("contactsFiltered").is_some());
    }
}
