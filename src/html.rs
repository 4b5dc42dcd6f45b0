//! Small HTML building blocks for widgets
//!
//! Attribute values and text content are always escaped here; callers pass
//! raw user text.

use std::collections::BTreeMap;

/// HTML attributes of a single control, rendered in key order.
pub type Attrs = BTreeMap<String, String>;

pub fn escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Render attributes as ` key="value"` pairs.
pub fn flatatt(attrs: &Attrs) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
    }
    out
}

fn with_name(attrs: &Attrs, name: &str) -> Attrs {
    let mut final_attrs = attrs.clone();
    final_attrs.insert("name".to_string(), name.to_string());
    final_attrs
}

pub fn textarea(name: &str, value: &str, attrs: &Attrs) -> String {
    let mut final_attrs = with_name(attrs, name);
    final_attrs
        .entry("cols".to_string())
        .or_insert_with(|| "40".to_string());
    final_attrs
        .entry("rows".to_string())
        .or_insert_with(|| "10".to_string());
    format!(
        "<textarea{}>{}</textarea>",
        flatatt(&final_attrs),
        escape(value)
    )
}

/// `<input>` of the given type; empty values are omitted like browsers expect.
pub fn input(input_type: &str, name: &str, value: &str, attrs: &Attrs) -> String {
    let mut final_attrs = with_name(attrs, name);
    final_attrs.insert("type".to_string(), input_type.to_string());
    if !value.is_empty() {
        final_attrs.insert("value".to_string(), value.to_string());
    }
    format!("<input{} />", flatatt(&final_attrs))
}

pub fn checkbox(name: &str, checked: bool, attrs: &Attrs) -> String {
    let mut final_attrs = with_name(attrs, name);
    final_attrs.insert("type".to_string(), "checkbox".to_string());
    if checked {
        final_attrs.insert("checked".to_string(), "checked".to_string());
    }
    format!("<input{} />", flatatt(&final_attrs))
}

pub fn select(name: &str, options: &[(String, String)], selected: &str, attrs: &Attrs) -> String {
    let final_attrs = with_name(attrs, name);
    let mut out = format!("<select{}>\n", flatatt(&final_attrs));
    for (key, label) in options {
        let marker = if key == selected {
            " selected=\"selected\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape(key),
            marker,
            escape(label)
        ));
    }
    out.push_str("</select>");
    out
}

pub fn label(for_id: &str, text: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            "<label class=\"{}\" for=\"{}\">{}</label>",
            escape(class),
            escape(for_id),
            escape(text)
        ),
        None => format!(
            "<label for=\"{}\">{}</label>",
            escape(for_id),
            escape(text)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_textarea_defaults() {
        let html = textarea("target", "Hello <b>", &attrs(&[("id", "id_target")]));
        assert_eq!(
            html,
            "<textarea cols=\"40\" id=\"id_target\" name=\"target\" rows=\"10\">Hello &lt;b&gt;</textarea>"
        );
    }

    #[test]
    fn test_textarea_keeps_explicit_size() {
        let html = textarea("t", "", &attrs(&[("cols", "80"), ("rows", "3")]));
        assert!(html.contains("cols=\"80\""));
        assert!(html.contains("rows=\"3\""));
    }

    #[test]
    fn test_input_omits_empty_value() {
        assert_eq!(
            input("text", "q", "", &Attrs::new()),
            "<input name=\"q\" type=\"text\" />"
        );
        assert_eq!(
            input("hidden", "checksum", "abc", &Attrs::new()),
            "<input name=\"checksum\" type=\"hidden\" value=\"abc\" />"
        );
    }

    #[test]
    fn test_checkbox() {
        assert!(checkbox("src", true, &Attrs::new()).contains("checked=\"checked\""));
        assert!(!checkbox("ctx", false, &Attrs::new()).contains("checked"));
    }

    #[test]
    fn test_select_marks_selected() {
        let options = vec![
            ("".to_string(), "All subprojects".to_string()),
            ("docs".to_string(), "Documentation".to_string()),
        ];
        let html = select("subproject", &options, "docs", &Attrs::new());
        assert!(html.contains("<option value=\"\">All subprojects</option>"));
        assert!(html.contains("<option value=\"docs\" selected=\"selected\">Documentation</option>"));
    }
}
