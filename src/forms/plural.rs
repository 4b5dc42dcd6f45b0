//! Plural-aware text area
//!
//! A translation with plural forms is edited as one `<textarea>` per form.
//! Form 0 keeps the field's own name and id; form `i` is submitted as
//! `{name}_{i}` with id `{id}_{i}`. Decoding walks the suffixes until the
//! first gap, so the number of values stored is whatever the browser sent.

use tracing::debug;

use super::data::FormData;
use super::error::{FormError, FormResult};
use crate::UiMessages;
use crate::html::{self, Attrs};
use crate::language::PluralInfo;

/// Highest numeric suffix looked at when decoding a submission.
pub const MAX_PLURAL_SUFFIX: usize = 9;

/// Double a leading newline.
///
/// HTML parsers drop a single newline right after `<textarea>`, so a value
/// starting with one needs a second to survive display. The browser's own
/// parsing removes the extra newline again, which is why decoding does not.
pub fn escape_newline(value: &str) -> String {
    if value.starts_with('\n') {
        format!("\n{}", value)
    } else {
        value.to_string()
    }
}

/// Text area that renders one control per plural form.
#[derive(Debug, Clone, Default)]
pub struct PluralTextarea {
    attrs: Attrs,
}

impl PluralTextarea {
    pub fn new() -> Self {
        PluralTextarea {
            attrs: Attrs::new(),
        }
    }

    /// Widget-level attributes; attributes passed to `render` win over these.
    pub fn with_attrs(attrs: Attrs) -> Self {
        PluralTextarea { attrs }
    }

    /// Render `values` as labelled text areas for `lang`.
    ///
    /// `attrs` must carry an `id`; it is the base for the ids of the extra
    /// plural controls.
    pub fn render(
        &self,
        lang: &dyn PluralInfo,
        values: &[String],
        name: &str,
        attrs: &Attrs,
        messages: &UiMessages,
    ) -> FormResult<String> {
        let mut final_attrs = self.attrs.clone();
        final_attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        final_attrs.insert("class".to_string(), "translation".to_string());

        let base_id = final_attrs
            .get("id")
            .cloned()
            .ok_or_else(|| FormError::MissingAttribute("id".to_string()))?;

        if values.len() <= 1 {
            let value = values.first().map(String::as_str).unwrap_or("");
            return Ok(html::textarea(name, &escape_newline(value), &final_attrs));
        }

        let mut blocks = Vec::with_capacity(values.len());
        for (idx, value) in values.iter().enumerate() {
            let (field_name, field_id) = if idx > 0 {
                (format!("{}_{}", name, idx), format!("{}_{}", base_id, idx))
            } else {
                (name.to_string(), base_id.clone())
            };
            final_attrs.insert("id".to_string(), field_id.clone());

            let textarea = html::textarea(&field_name, &escape_newline(value), &final_attrs);
            let label = lang.plural_label(idx, messages);
            blocks.push(format!(
                "{}<br />{}",
                html::label(&field_id, &label, Some("plural")),
                textarea
            ));
        }

        let plural_msg = format!(
            "<br /><span class=\"plural\"><abbr title=\"{}\">{}</abbr>: {}</span>",
            html::escape(&messages.get(
                "This equation is used to identify which plural form will be used based on given count (n)."
            )),
            html::escape(&messages.get("Plural equation")),
            html::escape(lang.plural_equation())
        );

        Ok(blocks.join("<br />") + &plural_msg)
    }

    /// Rebuild the plural values submitted for field `name`.
    ///
    /// A missing base field decodes as an empty string; carriage returns
    /// are removed from every value.
    pub fn value_from_data(&self, data: &FormData, name: &str) -> Vec<String> {
        let mut values = vec![data.get(name).cloned().unwrap_or_default()];
        for idx in 1..=MAX_PLURAL_SUFFIX {
            let field_name = format!("{}_{}", name, idx);
            match data.get(&field_name) {
                Some(value) => values.push(value.clone()),
                None => break,
            }
        }
        debug!("Decoded {} plural values for '{}'", values.len(), name);
        values
            .into_iter()
            .map(|value| value.replace('\r', ""))
            .collect()
    }
}
