//! Plural-aware HTML forms for translation editing
//!
//! The crate provides the form layer of a translation-management web
//! application: plural text areas that render one labelled control per
//! plural form and decode the submitted fields back into an ordered list,
//! plus the upload, search, merge and automatic-translation forms.
//!
//! ```ignore
//! use trans_forms::{Language, PluralTextarea, UiMessages};
//! use std::collections::BTreeMap;
//!
//! let lang = Language::from_locale("cs", "Czech", "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2");
//! let widget = PluralTextarea::new();
//! let mut attrs = BTreeMap::new();
//! attrs.insert("id".to_string(), "id_target".to_string());
//! let values = vec!["soubor".to_string(), "soubory".to_string(), "souborů".to_string()];
//! let html = widget.render(&lang, &values, "target", &attrs, &UiMessages::new())?;
//! ```
use std::collections::HashMap;

pub mod forms;
pub mod html;
pub mod language;
pub mod loader;

pub use forms::{
    AutoForm, AutoSubmission, Choice, CleanedData, DeclaredForm, ExtraUploadForm,
    ExtraUploadSubmission, Field, FieldKind, FieldValue, FileData, Form, FormData, FormError,
    FormErrors, FormResult, InMemoryCatalog, MergeForm, MergeSubmission, PluralTextarea,
    SearchForm, SearchSubmission, SimpleUploadForm, SimpleUploadSubmission, Subproject,
    SubprojectCatalog, SubprojectRef, TranslationForm, TranslationSubmission, UploadForm,
    UploadSubmission, UploadedFile, Widget, escape_newline,
};
pub use language::{Language, PluralInfo};
pub use loader::load_messages_from_file;

/// Translations of the user-interface strings used by the forms.
///
/// Keys are the English strings themselves, gettext style: a string without
/// a translation is shown as-is.
#[derive(Debug, Clone, Default)]
pub struct UiMessages(pub HashMap<String, String>);

impl UiMessages {
    pub fn new() -> Self {
        UiMessages(HashMap::new())
    }
    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.0.insert(key.to_owned(), message.to_owned());
        self
    }
    pub fn get_message(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
    pub fn get_messages(&self) -> &HashMap<String, String> {
        &self.0
    }
    pub fn get(&self, key: &str) -> String {
        self.0.get(key).unwrap_or(&key.to_string()).to_string()
    }

    /// Translate `key` and substitute `$1`, `$2`, ... with `values`.
    pub fn format(&self, key: &str, values: &[String]) -> String {
        let mut result = self.get(key);
        // Highest index first so that $1 does not eat the prefix of $10
        for (idx, value) in values.iter().enumerate().rev() {
            result = result.replace(&format!("${}", idx + 1), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untranslated_falls_back_to_key() {
        let messages = UiMessages::new();
        assert_eq!(messages.get("Plural equation"), "Plural equation");
        assert!(messages.get_message("Plural equation").is_none());
    }

    #[test]
    fn test_translated_message() {
        let mut messages = UiMessages::new();
        messages
            .with_message("Plural equation", "Rovnice plurálu")
            .with_message("Fuzzy", "Nejasný");

        assert_eq!(messages.get("Plural equation"), "Rovnice plurálu");
        assert_eq!(messages.get("Fuzzy"), "Nejasný");
        assert_eq!(messages.get_messages().len(), 2);
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let mut messages = UiMessages::new();
        messages.with_message("Plural form $1", "Forma $1");

        assert_eq!(
            messages.format("Plural form $1", &["2".to_string()]),
            "Forma 2"
        );
        assert_eq!(
            messages.format("$1 of $2", &["a".to_string(), "b".to_string()]),
            "a of b"
        );
    }
}
