//! Field collections and their validation
//!
//! A [`Form`] is an ordered list of [`Field`] declarations. Cleaning a
//! submission runs every field, collecting the messages of all failing
//! fields rather than stopping at the first one, so a re-rendered form can
//! show every problem at once.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use super::data::{FileData, FormData, UploadedFile};
use super::error::{FormError, FormErrors, FormResult};
use super::field::{Field, FieldKind, FieldValue, Widget};
use super::plural::PluralTextarea;
use crate::UiMessages;
use crate::html::{self, Attrs};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$";

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

const REQUIRED: &str = "This field is required.";

/// Cleaned values of a valid submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedData(pub HashMap<String, FieldValue>);

impl CleanedData {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Text value, or an empty string for a blank optional field.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Bool(true)))
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(FieldValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn plural(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(FieldValue::Plural(values)) => Some(values),
            _ => None,
        }
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        match self.0.get(name) {
            Some(FieldValue::File(file)) => Some(file),
            _ => None,
        }
    }

    /// Move an uploaded file out of the cleaned data.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        match self.0.remove(name) {
            Some(FieldValue::File(file)) => Some(file),
            Some(other) => {
                self.0.insert(name.to_string(), other);
                None
            }
            None => None,
        }
    }
}

/// An ordered collection of fields.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new() -> Self {
        Form { fields: Vec::new() }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Validate a submission.
    pub fn clean(
        &self,
        data: &FormData,
        files: &FileData,
        messages: &UiMessages,
    ) -> Result<CleanedData, FormErrors> {
        let mut cleaned = HashMap::new();
        let mut errors = FormErrors::new();

        for field in &self.fields {
            match clean_field(field, data, files, messages) {
                Ok(value) => {
                    cleaned.insert(field.name.clone(), value);
                }
                Err(message) => errors.add(&field.name, message),
            }
        }

        if errors.is_empty() {
            Ok(CleanedData(cleaned))
        } else {
            debug!("Form rejected with errors on {} fields", errors.len());
            Err(errors)
        }
    }

    /// Render the form as paragraphs, one per visible field.
    ///
    /// `values` override the declared initial values. Hidden fields are
    /// rendered first, without a label.
    pub fn as_p(
        &self,
        values: &HashMap<String, FieldValue>,
        messages: &UiMessages,
    ) -> FormResult<String> {
        let mut hidden = Vec::new();
        let mut visible = Vec::new();

        for field in &self.fields {
            let value = values.get(&field.name).or(field.initial.as_ref());
            let widget = render_widget(field, value, messages)?;
            if field.widget == Widget::HiddenInput {
                hidden.push(widget);
                continue;
            }

            let mut paragraph = format!(
                "<p>{} {}",
                html::label(
                    &format!("id_{}", field.name),
                    &format!("{}:", messages.get(&field.label_text())),
                    None
                ),
                widget
            );
            if let Some(help_text) = &field.help_text {
                paragraph.push_str(&format!(
                    " <span class=\"helptext\">{}</span>",
                    html::escape(&messages.get(help_text))
                ));
            }
            paragraph.push_str("</p>");
            visible.push(paragraph);
        }

        hidden.extend(visible);
        Ok(hidden.join("\n"))
    }
}

fn clean_field(
    field: &Field,
    data: &FormData,
    files: &FileData,
    messages: &UiMessages,
) -> Result<FieldValue, String> {
    let raw = data.get(&field.name).map(String::as_str).unwrap_or("");

    match &field.kind {
        FieldKind::Char => {
            if raw.is_empty() && field.required {
                return Err(messages.get(REQUIRED));
            }
            Ok(FieldValue::Text(raw.to_string()))
        }
        FieldKind::Email => {
            let value = raw.trim();
            if value.is_empty() {
                if field.required {
                    return Err(messages.get(REQUIRED));
                }
                return Ok(FieldValue::Text(String::new()));
            }
            if !EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value)) {
                return Err(messages.get("Enter a valid email address."));
            }
            Ok(FieldValue::Text(value.to_string()))
        }
        FieldKind::Integer => {
            let value = raw.trim();
            if value.is_empty() {
                if field.required {
                    return Err(messages.get(REQUIRED));
                }
                return Ok(FieldValue::Empty);
            }
            value
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| messages.get("Enter a whole number."))
        }
        FieldKind::Boolean => {
            let lowered = raw.to_ascii_lowercase();
            let checked = !matches!(lowered.as_str(), "" | "false" | "0" | "off");
            if !checked && field.required {
                return Err(messages.get(REQUIRED));
            }
            Ok(FieldValue::Bool(checked))
        }
        FieldKind::Choice(choices) => {
            if raw.is_empty() {
                if field.required {
                    return Err(messages.get(REQUIRED));
                }
                return Ok(FieldValue::Text(String::new()));
            }
            if !choices.iter().any(|choice| choice.key == raw) {
                return Err(messages.format(
                    "Select a valid choice. $1 is not one of the available choices.",
                    &[raw.to_string()],
                ));
            }
            Ok(FieldValue::Text(raw.to_string()))
        }
        FieldKind::File => match files.get(&field.name) {
            None if field.required => Err(messages.get(REQUIRED)),
            None => Ok(FieldValue::Empty),
            Some(file) if file.name.is_empty() => Err(messages
                .get("No file was submitted. Check the encoding type on the form.")),
            Some(file) if file.content.is_empty() => {
                Err(messages.get("The submitted file is empty."))
            }
            Some(file) => Ok(FieldValue::File(file.clone())),
        },
        FieldKind::Plural(_) => {
            let values = PluralTextarea::new().value_from_data(data, &field.name);
            if field.required && values.iter().all(|value| value.is_empty()) {
                return Err(messages.get(REQUIRED));
            }
            Ok(FieldValue::Plural(values))
        }
    }
}

fn render_widget(
    field: &Field,
    value: Option<&FieldValue>,
    messages: &UiMessages,
) -> FormResult<String> {
    let mut attrs = Attrs::new();
    attrs.insert("id".to_string(), format!("id_{}", field.name));
    let display = value.map(FieldValue::as_display).unwrap_or_default();

    let rendered = match field.widget {
        Widget::TextInput => html::input("text", &field.name, &display, &attrs),
        Widget::HiddenInput => html::input("hidden", &field.name, &display, &attrs),
        Widget::EmailInput => html::input("email", &field.name, &display, &attrs),
        Widget::NumberInput => html::input("number", &field.name, &display, &attrs),
        Widget::FileInput => html::input("file", &field.name, "", &attrs),
        Widget::CheckboxInput => {
            let checked = matches!(value, Some(FieldValue::Bool(true)));
            html::checkbox(&field.name, checked, &attrs)
        }
        Widget::Select => {
            let options: Vec<(String, String)> = field
                .choices()
                .iter()
                .map(|choice| (choice.key.clone(), choice.label.clone()))
                .collect();
            html::select(&field.name, &options, &display, &attrs)
        }
        Widget::PluralTextarea => {
            let FieldKind::Plural(language) = &field.kind else {
                return Err(FormError::Other(format!(
                    "Field '{}' uses a plural text area but is not a plural field",
                    field.name
                )));
            };
            let values = match value {
                Some(FieldValue::Plural(values)) => values.clone(),
                Some(other) => vec![other.as_display()],
                None => vec![String::new()],
            };
            PluralTextarea::new().render(
                language.as_ref(),
                &values,
                &field.name,
                &attrs,
                messages,
            )?
        }
    };
    Ok(rendered)
}
