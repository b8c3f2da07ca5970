#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub important: bool,
}

/// Body of `POST /api/notes`. Both fields are optional on the wire so that a
/// missing `content` can be reported as a client error rather than a
/// deserialization failure.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct NewNotePayload {
    pub content: Option<String>,
    pub important: Option<bool>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct UpdateNotePayload {
    pub content: String,
    pub important: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub number: String,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct NewPersonPayload {
    pub name: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
