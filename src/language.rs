//! Plural information about a target language
//!
//! The plural text area only needs two things from a language: a label for
//! each plural form and the plural equation to show next to the controls.
//! Callers usually own richer language records; anything implementing
//! [`PluralInfo`] can be handed to the widget.

use icu_locale::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};
use tracing::debug;

use crate::UiMessages;
use crate::forms::{FormError, FormResult};

/// What the plural widget needs to know about a language.
pub trait PluralInfo: Send + Sync + std::fmt::Debug {
    /// Number of plural forms the language uses
    fn nplurals(&self) -> usize;

    /// Human readable label for plural form `idx`, translated with `messages`
    fn plural_label(&self, idx: usize, messages: &UiMessages) -> String;

    /// Plural equation, for display only
    fn plural_equation(&self) -> &str;
}

/// A target language with its gettext plural definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub nplurals: usize,
    pub plural_equation: String,
    categories: Vec<PluralCategory>,
}

impl Language {
    /// Language with an explicit plural count and no CLDR category names.
    pub fn new(code: &str, name: &str, nplurals: usize, plural_equation: &str) -> Self {
        Language {
            code: code.to_string(),
            name: name.to_string(),
            nplurals,
            plural_equation: plural_equation.to_string(),
            categories: Vec::new(),
        }
    }

    /// Language whose plural forms are taken from CLDR cardinal rules.
    ///
    /// The number of forms is the number of categories reachable with
    /// integer counts, which is what gettext catalogs use.
    pub fn from_locale(code: &str, name: &str, plural_equation: &str) -> FormResult<Self> {
        let categories = get_plural_categories(code)?;
        debug!(
            "Language '{}' has {} plural forms: {:?}",
            code,
            categories.len(),
            categories
        );
        Ok(Language {
            code: code.to_string(),
            name: name.to_string(),
            nplurals: categories.len(),
            plural_equation: plural_equation.to_string(),
            categories,
        })
    }

    pub fn categories(&self) -> &[PluralCategory] {
        &self.categories
    }
}

impl PluralInfo for Language {
    fn nplurals(&self) -> usize {
        self.nplurals
    }

    fn plural_label(&self, idx: usize, messages: &UiMessages) -> String {
        if self.categories.len() == self.nplurals {
            if let Some(category) = self.categories.get(idx) {
                return messages.get(category_name(*category));
            }
        }
        if self.nplurals == 2 {
            match idx {
                0 => return messages.get("Singular"),
                1 => return messages.get("Plural"),
                _ => {}
            }
        }
        messages.format("Plural form $1", &[idx.to_string()])
    }

    fn plural_equation(&self) -> &str {
        &self.plural_equation
    }
}

fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "Zero",
        PluralCategory::One => "One",
        PluralCategory::Two => "Two",
        PluralCategory::Few => "Few",
        PluralCategory::Many => "Many",
        PluralCategory::Other => "Other",
    }
}

/// Largest count checked when collecting a language's plural categories.
const MAX_PROBED_COUNT: usize = 1000;

/// Position of a category among the plural forms of a gettext catalog.
fn category_rank(category: PluralCategory) -> u8 {
    match category {
        PluralCategory::Zero => 0,
        PluralCategory::One => 1,
        PluralCategory::Two => 2,
        PluralCategory::Few => 3,
        PluralCategory::Many => 4,
        PluralCategory::Other => 5,
    }
}

/// Plural categories a language uses for integer counts, in gettext order.
///
/// Every count from 0 to 1000 is classified and the distinct categories
/// are kept. English yields `[One, Other]`, Russian `[One, Few, Many]`
/// and Irish `[One, Two, Few, Many, Other]`.
pub fn get_plural_categories(locale_str: &str) -> FormResult<Vec<PluralCategory>> {
    let locale: Locale = locale_str.parse().map_err(|e| {
        FormError::Other(format!("Failed to parse locale '{}': {}", locale_str, e))
    })?;

    let pr = PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).map_err(|e| {
        FormError::Other(format!(
            "Failed to create PluralRules for locale '{}': {}",
            locale_str, e
        ))
    })?;

    let mut categories: Vec<PluralCategory> = Vec::new();
    for n in 0..=MAX_PROBED_COUNT {
        let category = pr.category_for(n);
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories.sort_by_key(|category| category_rank(*category));

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_categories() {
        let categories = get_plural_categories("en").unwrap();
        assert_eq!(categories, vec![PluralCategory::One, PluralCategory::Other]);
    }

    #[test]
    fn test_russian_categories() {
        let categories = get_plural_categories("ru").unwrap();
        assert_eq!(
            categories,
            vec![PluralCategory::One, PluralCategory::Few, PluralCategory::Many]
        );
    }

    #[test]
    fn test_irish_categories() {
        let categories = get_plural_categories("ga").unwrap();
        assert_eq!(
            categories,
            vec![
                PluralCategory::One,
                PluralCategory::Two,
                PluralCategory::Few,
                PluralCategory::Many,
                PluralCategory::Other
            ]
        );
    }

    #[test]
    fn test_welsh_categories() {
        let categories = get_plural_categories("cy").unwrap();
        assert_eq!(
            categories,
            vec![
                PluralCategory::Zero,
                PluralCategory::One,
                PluralCategory::Two,
                PluralCategory::Few,
                PluralCategory::Many,
                PluralCategory::Other
            ]
        );
    }

    #[test]
    fn test_irish_labels_include_many() {
        let lang = Language::from_locale("ga", "Irish", "n==1 ? 0 : n==2 ? 1 : n<7 ? 2 : n<11 ? 3 : 4")
            .unwrap();
        let messages = UiMessages::new();

        assert_eq!(lang.nplurals(), 5);
        assert_eq!(lang.plural_label(3, &messages), "Many");
        assert_eq!(lang.plural_label(4, &messages), "Other");
    }

    #[test]
    fn test_invalid_locale() {
        assert!(get_plural_categories("not a locale!").is_err());
    }

    #[test]
    fn test_labels_from_cldr() {
        let lang = Language::from_locale("ru", "Russian", "n%10==1 && n%100!=11 ? 0 : 1").unwrap();
        let messages = UiMessages::new();

        assert_eq!(lang.nplurals(), 3);
        assert_eq!(lang.plural_label(0, &messages), "One");
        assert_eq!(lang.plural_label(1, &messages), "Few");
        assert_eq!(lang.plural_label(2, &messages), "Many");
        // Past the known categories
        assert_eq!(lang.plural_label(3, &messages), "Plural form 3");
    }

    #[test]
    fn test_two_form_labels() {
        let lang = Language::new("de", "German", 2, "(n != 1)");
        let messages = UiMessages::new();

        assert_eq!(lang.plural_label(0, &messages), "Singular");
        assert_eq!(lang.plural_label(1, &messages), "Plural");
        assert_eq!(lang.plural_equation(), "(n != 1)");
    }

    #[test]
    fn test_numbered_labels_are_translated() {
        let lang = Language::new("ga", "Irish", 5, "n==1 ? 0 : n==2 ? 1 : n<7 ? 2 : n<11 ? 3 : 4");
        let mut messages = UiMessages::new();
        messages.with_message("Plural form $1", "Tvar $1");

        assert_eq!(lang.plural_label(0, &messages), "Tvar 0");
        assert_eq!(lang.plural_label(4, &messages), "Tvar 4");
    }
}
