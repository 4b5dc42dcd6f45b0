use serde::Serialize;
use std::sync::Arc;

use super::data::UploadedFile;
use crate::language::PluralInfo;

/// One entry of a choice field: submitted key and displayed label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

impl Choice {
    pub fn new(key: &str, label: &str) -> Self {
        Choice {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// What a field accepts, and therefore how it is validated.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Char,
    Boolean,
    Email,
    Integer,
    File,
    Choice(Vec<Choice>),
    /// Plural text, rendered with the labels of the given language
    Plural(Arc<dyn PluralInfo>),
}

impl FieldKind {
    pub fn default_widget(&self) -> Widget {
        match self {
            FieldKind::Char => Widget::TextInput,
            FieldKind::Boolean => Widget::CheckboxInput,
            FieldKind::Email => Widget::EmailInput,
            FieldKind::Integer => Widget::NumberInput,
            FieldKind::File => Widget::FileInput,
            FieldKind::Choice(_) => Widget::Select,
            FieldKind::Plural(_) => Widget::PluralTextarea,
        }
    }
}

/// How a field is shown in HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    TextInput,
    HiddenInput,
    EmailInput,
    NumberInput,
    CheckboxInput,
    FileInput,
    Select,
    PluralTextarea,
}

/// A cleaned (or initial) field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Plural(Vec<String>),
    Bool(bool),
    Integer(i64),
    File(UploadedFile),
    /// Optional field left blank
    Empty,
}

impl FieldValue {
    /// Value as it would be placed into an HTML control.
    pub fn as_display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Plural(values) => values.first().cloned().unwrap_or_default(),
            FieldValue::Bool(flag) => flag.to_string(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::File(_) | FieldValue::Empty => String::new(),
        }
    }
}

/// Declaration of a single form field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub widget: Widget,
    pub label: Option<String>,
    pub required: bool,
    pub initial: Option<FieldValue>,
    pub help_text: Option<String>,
}

impl Field {
    /// Required field with the kind's default widget
    pub fn new(name: &str, kind: FieldKind) -> Self {
        let widget = kind.default_widget();
        Field {
            name: name.to_string(),
            kind,
            widget,
            label: None,
            required: true,
            initial: None,
            help_text: None,
        }
    }

    pub fn char(name: &str) -> Self {
        Field::new(name, FieldKind::Char)
    }

    pub fn boolean(name: &str) -> Self {
        Field::new(name, FieldKind::Boolean)
    }

    pub fn email(name: &str) -> Self {
        Field::new(name, FieldKind::Email)
    }

    pub fn integer(name: &str) -> Self {
        Field::new(name, FieldKind::Integer)
    }

    pub fn file(name: &str) -> Self {
        Field::new(name, FieldKind::File)
    }

    pub fn choice(name: &str, choices: Vec<Choice>) -> Self {
        Field::new(name, FieldKind::Choice(choices))
    }

    pub fn plural(name: &str, language: Arc<dyn PluralInfo>) -> Self {
        Field::new(name, FieldKind::Plural(language))
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }

    pub fn with_initial(mut self, initial: FieldValue) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Label to show, falling back to the field name made readable:
    /// `author_email` becomes `Author email`.
    pub fn label_text(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Choices of a choice field, empty for every other kind.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Choice(choices) => choices,
            _ => &[],
        }
    }

    pub fn set_choices(&mut self, choices: Vec<Choice>) {
        self.kind = FieldKind::Choice(choices);
    }
}
