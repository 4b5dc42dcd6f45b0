//! The concrete forms of the translation editor
//!
//! Each form declares its fields once and maps a cleaned submission into a
//! typed struct the request handler can act on.

use serde::Serialize;
use std::sync::Arc;

use super::data::{FileData, FormData, UploadedFile};
use super::error::FormErrors;
use super::field::{Field, FieldValue, Widget};
use super::form::{CleanedData, Form};
use crate::UiMessages;
use crate::language::PluralInfo;

const KEEP_EMPTY_FOR_USER: &str = "Keep empty for using currently logged in user.";

/// A form with a fixed field layout and a typed result.
pub trait DeclaredForm {
    type Submission;

    /// Field declarations of the form
    fn form(&self) -> Form;

    /// Map already validated data into the typed submission
    fn from_cleaned(&self, cleaned: CleanedData) -> Result<Self::Submission, FormErrors>;

    /// Validate `data` and `files` and build the typed submission
    fn submit(
        &self,
        data: &FormData,
        files: &FileData,
        messages: &UiMessages,
    ) -> Result<Self::Submission, FormErrors> {
        let cleaned = self.form().clean(data, files, messages)?;
        self.from_cleaned(cleaned)
    }
}

fn missing(field: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add(field, "This field is required.".to_string());
    errors
}

fn required_file(cleaned: &mut CleanedData, name: &str) -> Result<UploadedFile, FormErrors> {
    cleaned.take_file(name).ok_or_else(|| missing(name))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Editing a single translation unit
#[derive(Debug, Clone)]
pub struct TranslationForm {
    language: Arc<dyn PluralInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationSubmission {
    pub checksum: String,
    pub target: Vec<String>,
    pub fuzzy: bool,
}

impl TranslationForm {
    pub fn new(language: Arc<dyn PluralInfo>) -> Self {
        TranslationForm { language }
    }
}

impl DeclaredForm for TranslationForm {
    type Submission = TranslationSubmission;

    fn form(&self) -> Form {
        Form::new()
            .with_field(Field::char("checksum").with_widget(Widget::HiddenInput))
            .with_field(Field::plural("target", self.language.clone()).optional())
            .with_field(Field::boolean("fuzzy").with_label("Fuzzy").optional())
    }

    fn from_cleaned(&self, cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(TranslationSubmission {
            checksum: cleaned.text_or_empty("checksum"),
            target: cleaned.plural("target").map(<[String]>::to_vec).unwrap_or_default(),
            fuzzy: cleaned.flag("fuzzy"),
        })
    }
}

/// Uploading a translation file
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleUploadForm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleUploadSubmission {
    pub file: UploadedFile,
}

impl DeclaredForm for SimpleUploadForm {
    type Submission = SimpleUploadSubmission;

    fn form(&self) -> Form {
        Form::new().with_field(Field::file("file").with_label("File"))
    }

    fn from_cleaned(&self, mut cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(SimpleUploadSubmission {
            file: required_file(&mut cleaned, "file")?,
        })
    }
}

/// Uploading a translation file, optionally overwriting existing strings
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadForm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSubmission {
    pub file: UploadedFile,
    pub overwrite: bool,
}

impl DeclaredForm for UploadForm {
    type Submission = UploadSubmission;

    fn form(&self) -> Form {
        SimpleUploadForm.form().with_field(
            Field::boolean("overwrite")
                .with_label("Overwrite existing translations")
                .optional(),
        )
    }

    fn from_cleaned(&self, mut cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(UploadSubmission {
            overwrite: cleaned.flag("overwrite"),
            file: required_file(&mut cleaned, "file")?,
        })
    }
}

/// Upload form for privileged users, who may credit another author
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraUploadForm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraUploadSubmission {
    pub file: UploadedFile,
    pub overwrite: bool,
    /// `None` means the logged in user
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl DeclaredForm for ExtraUploadForm {
    type Submission = ExtraUploadSubmission;

    fn form(&self) -> Form {
        UploadForm
            .form()
            .with_field(
                Field::char("author_name")
                    .with_label("Author name")
                    .with_help_text(KEEP_EMPTY_FOR_USER)
                    .optional(),
            )
            .with_field(
                Field::email("author_email")
                    .with_label("Author email")
                    .with_help_text(KEEP_EMPTY_FOR_USER)
                    .optional(),
            )
    }

    fn from_cleaned(&self, mut cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(ExtraUploadSubmission {
            overwrite: cleaned.flag("overwrite"),
            author_name: non_empty(cleaned.text_or_empty("author_name")),
            author_email: non_empty(cleaned.text_or_empty("author_email")),
            file: required_file(&mut cleaned, "file")?,
        })
    }
}

/// Searching translation units
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchForm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSubmission {
    pub q: String,
    pub exact: bool,
    pub src: bool,
    pub tgt: bool,
    pub ctx: bool,
}

impl DeclaredForm for SearchForm {
    type Submission = SearchSubmission;

    fn form(&self) -> Form {
        Form::new()
            .with_field(Field::char("q").with_label("Query"))
            .with_field(
                Field::boolean("exact")
                    .with_label("Exact match")
                    .with_initial(FieldValue::Bool(false))
                    .optional(),
            )
            .with_field(
                Field::boolean("src")
                    .with_label("Search in source strings")
                    .with_initial(FieldValue::Bool(true))
                    .optional(),
            )
            .with_field(
                Field::boolean("tgt")
                    .with_label("Search in target strings")
                    .with_initial(FieldValue::Bool(true))
                    .optional(),
            )
            .with_field(
                Field::boolean("ctx")
                    .with_label("Search in context strings")
                    .with_initial(FieldValue::Bool(false))
                    .optional(),
            )
    }

    fn from_cleaned(&self, cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(SearchSubmission {
            q: cleaned.text_or_empty("q"),
            exact: cleaned.flag("exact"),
            src: cleaned.flag("src"),
            tgt: cleaned.flag("tgt"),
            ctx: cleaned.flag("ctx"),
        })
    }
}

/// Merging a translation from another unit
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeForm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSubmission {
    pub checksum: String,
    /// Id of the unit to take the translation from
    pub merge: i64,
}

impl DeclaredForm for MergeForm {
    type Submission = MergeSubmission;

    fn form(&self) -> Form {
        Form::new()
            .with_field(Field::char("checksum"))
            .with_field(Field::integer("merge"))
    }

    fn from_cleaned(&self, cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        Ok(MergeSubmission {
            checksum: cleaned.text_or_empty("checksum"),
            merge: cleaned.integer("merge").ok_or_else(|| missing("merge"))?,
        })
    }
}
