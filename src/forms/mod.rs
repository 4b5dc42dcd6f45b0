//! Forms of the translation editor
//!
//! This module holds the generic field/validation layer and the concrete
//! forms built on it.
//!
//! # Overview
//!
//! 1. **Fields & forms** - `Field` declarations collected into a `Form`, cleaned into `CleanedData`
//! 2. **Plural text area** - one `<textarea>` per plural form, decoded back from `{name}_{i}` fields
//! 3. **Declared forms** - translation, upload, search and merge forms with typed submissions
//! 4. **Automatic translation** - a form whose choices come from a `SubprojectCatalog`
//!
//! # Example
//!
//! ```ignore
//! use trans_forms::{DeclaredForm, SearchForm, UiMessages};
//!
//! let submission = SearchForm.submit(&data, &files, &UiMessages::new())?;
//! if submission.src { /* search source strings */ }
//! ```
pub mod auto;
pub mod catalog;
pub mod data;
pub mod declared;
pub mod error;
pub mod field;
pub mod form;
pub mod plural;

#[cfg(test)]
mod integration_tests;

pub use auto::{AutoForm, AutoSubmission};
pub use catalog::{InMemoryCatalog, Subproject, SubprojectCatalog, SubprojectRef};
pub use data::{FileData, FormData, UploadedFile};
pub use declared::{
    DeclaredForm, ExtraUploadForm, ExtraUploadSubmission, MergeForm, MergeSubmission, SearchForm,
    SearchSubmission, SimpleUploadForm, SimpleUploadSubmission, TranslationForm,
    TranslationSubmission, UploadForm, UploadSubmission,
};
pub use error::{FormError, FormErrors, FormResult};
pub use field::{Choice, Field, FieldKind, FieldValue, Widget};
pub use form::{CleanedData, Form};
pub use plural::{MAX_PLURAL_SUFFIX, PluralTextarea, escape_newline};
