//! End-to-end tests: render a form, submit it the way a browser would,
//! and clean the result.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::UiMessages;
    use crate::language::{Language, PluralInfo};
    use regex::Regex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Collect the `<textarea>` controls of a fragment as a browser submits
    /// them: entities decoded, the newline following the start tag dropped.
    fn browser_submit(html: &str) -> FormData {
        let re = Regex::new(r#"(?s)<textarea[^>]* name="([^"]+)"[^>]*>(.*?)</textarea>"#).unwrap();
        re.captures_iter(html)
            .map(|caps| {
                let raw = unescape(&caps[2]);
                let value = raw.strip_prefix('\n').unwrap_or(&raw).replace('\n', "\r\n");
                (caps[1].to_string(), value)
            })
            .collect()
    }

    fn unescape(value: &str) -> String {
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x22;", "\"")
            .replace("&#34;", "\"")
            .replace("&#x27;", "'")
            .replace("&#39;", "'")
            .replace("&#x2f;", "/")
            .replace("&#x2F;", "/")
            .replace("&#47;", "/")
            .replace("&amp;", "&")
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn render(values: &[String], lang: &Language) -> String {
        let mut attrs = crate::html::Attrs::new();
        attrs.insert("id".to_string(), "id_target".to_string());
        PluralTextarea::new()
            .render(lang, values, "target", &attrs, &UiMessages::new())
            .unwrap()
    }

    #[test]
    fn test_plural_round_trip() {
        let lang = Language::from_locale("ru", "Russian", "n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2").unwrap();
        let original = strings(&["файл", "файла", "файлов"]);

        let submitted = browser_submit(&render(&original, &lang));
        assert_eq!(submitted.len(), 3);

        let decoded = PluralTextarea::new().value_from_data(&submitted, "target");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_leading_newline_survives_round_trip() {
        let lang = Language::new("de", "German", 2, "(n != 1)");
        let original = strings(&["\nDatei", "\n\nDateien"]);

        let submitted = browser_submit(&render(&original, &lang));
        let decoded = PluralTextarea::new().value_from_data(&submitted, "target");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_markup_survives_round_trip() {
        let lang = Language::new("de", "German", 2, "(n != 1)");
        let original = strings(&["<b>1</b> & \"one\" isn't"]);

        let submitted = browser_submit(&render(&original, &lang));
        let decoded = PluralTextarea::new().value_from_data(&submitted, "target");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_translation_form_end_to_end() {
        let lang: Arc<dyn PluralInfo> = Arc::new(Language::new(
            "cs",
            "Czech",
            3,
            "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2",
        ));
        let translation = TranslationForm::new(lang);

        let mut values = HashMap::new();
        values.insert(
            "target".to_string(),
            FieldValue::Plural(strings(&["soubor\nřádek", "soubory", "souborů"])),
        );
        let html = translation.form().as_p(&values, &UiMessages::new()).unwrap();

        let mut submitted = browser_submit(&html);
        submitted.insert("checksum".to_string(), "deadbeef".to_string());
        submitted.insert("fuzzy".to_string(), "on".to_string());

        let submission = translation
            .submit(&submitted, &FileData::new(), &UiMessages::new())
            .unwrap();
        assert_eq!(submission.checksum, "deadbeef");
        assert_eq!(
            submission.target,
            strings(&["soubor\nřádek", "soubory", "souborů"])
        );
        assert!(submission.fuzzy);
    }

    #[test]
    fn test_fewer_submitted_forms_than_language_expects() {
        // Czech has three forms but the client only sent two
        let lang: Arc<dyn PluralInfo> = Arc::new(Language::new(
            "cs",
            "Czech",
            3,
            "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2",
        ));
        let mut submitted = FormData::new();
        submitted.insert("checksum".to_string(), "deadbeef".to_string());
        submitted.insert("target".to_string(), "soubor".to_string());
        submitted.insert("target_1".to_string(), "soubory".to_string());

        let submission = TranslationForm::new(lang)
            .submit(&submitted, &FileData::new(), &UiMessages::new())
            .unwrap();
        assert_eq!(submission.target, strings(&["soubor", "soubory"]));
    }

    #[tokio::test]
    async fn test_auto_form_against_catalog() {
        let catalog = InMemoryCatalog::from_json(
            r#"{"projects": [{"slug": "P", "subprojects": [
                {"slug": "a", "name": "A"},
                {"slug": "b", "name": "B"},
                {"slug": "c", "name": "C"}
            ]}]}"#,
        )
        .unwrap();

        let form = AutoForm::new(&catalog, &SubprojectRef::new("P", "b"), &UiMessages::new())
            .await
            .unwrap();
        let pairs: Vec<(&str, &str)> = form
            .choices()
            .iter()
            .map(|c| (c.key.as_str(), c.label.as_str()))
            .collect();
        assert_eq!(pairs, vec![("", "All subprojects"), ("a", "A"), ("c", "C")]);
    }
}
