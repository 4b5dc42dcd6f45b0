//! Automatic translation from sibling sub-projects

use serde::Serialize;
use tracing::info;

use super::catalog::{SubprojectCatalog, SubprojectRef};
use super::error::{FormErrors, FormResult};
use super::field::{Choice, Field, FieldValue};
use super::form::{CleanedData, Form};
use super::declared::DeclaredForm;
use crate::UiMessages;

/// Choosing where automatic translation takes its strings from.
///
/// The sub-project choices are fetched when the form is built, so they
/// reflect the catalog at request time.
#[derive(Debug, Clone)]
pub struct AutoForm {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoSubmission {
    pub overwrite: bool,
    /// `None` means all sub-projects
    pub subproject: Option<String>,
}

impl AutoForm {
    /// Build the form for translating `current`.
    ///
    /// The first choice is always "All subprojects" with an empty key,
    /// followed by every other sub-project of the same project.
    pub async fn new(
        catalog: &dyn SubprojectCatalog,
        current: &SubprojectRef,
        messages: &UiMessages,
    ) -> FormResult<Self> {
        let siblings = catalog
            .siblings(&current.project, &current.subproject)
            .await?;
        info!(
            "{}: {} sub-projects available for automatic translation of {}/{}",
            catalog.catalog_name(),
            siblings.len(),
            current.project,
            current.subproject
        );

        let mut choices = vec![Choice::new("", &messages.get("All subprojects"))];
        choices.extend(
            siblings
                .iter()
                .map(|subproject| Choice::new(&subproject.slug, &subproject.name)),
        );
        Ok(AutoForm { choices })
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
}

impl DeclaredForm for AutoForm {
    type Submission = AutoSubmission;

    fn form(&self) -> Form {
        Form::new()
            .with_field(
                Field::boolean("overwrite")
                    .with_label("Overwrite entries")
                    .with_initial(FieldValue::Bool(false))
                    .optional(),
            )
            .with_field(
                Field::choice("subproject", self.choices.clone())
                    .with_label("Subproject to use")
                    .with_initial(FieldValue::Text(String::new()))
                    .optional(),
            )
    }

    fn from_cleaned(&self, cleaned: CleanedData) -> Result<Self::Submission, FormErrors> {
        let subproject = cleaned.text_or_empty("subproject");
        Ok(AutoSubmission {
            overwrite: cleaned.flag("overwrite"),
            subproject: if subproject.is_empty() {
                None
            } else {
                Some(subproject)
            },
        })
    }
}
