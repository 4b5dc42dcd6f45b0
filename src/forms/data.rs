use serde::Serialize;
use std::collections::HashMap;

/// Submitted text fields of a request, keyed by field name
pub type FormData = HashMap<String, String>;

/// Submitted files of a request, keyed by field name
pub type FileData = HashMap<String, UploadedFile>;

/// A file received with a multipart request.
///
/// Storage is somebody else's job; the form only checks that something
/// usable arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: &str, content: Vec<u8>) -> Self {
        UploadedFile {
            name: name.to_string(),
            content_type: None,
            content,
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
