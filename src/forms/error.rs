use std::collections::BTreeMap;

/// Error types for the form layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A widget was asked to render without an attribute it relies on
    MissingAttribute(String),
    /// The sub-project catalog could not answer a query
    Catalog(String),
    /// UI message files could not be read or parsed
    Loader(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingAttribute(name) => {
                write!(f, "Missing required widget attribute: {}", name)
            }
            FormError::Catalog(msg) => write!(f, "Catalog error: {}", msg),
            FormError::Loader(msg) => write!(f, "Loader error: {}", msg),
            FormError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FormError {}

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Validation failures, keyed by field name.
///
/// Each field keeps its own ordered list of messages, the way a rendered
/// form shows them next to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(pub BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        FormErrors(BTreeMap::new())
    }

    pub fn add(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(|errors| !errors.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}
