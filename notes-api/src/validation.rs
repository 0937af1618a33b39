use std::fmt::Display;

pub const NOTE_CONTENT_MIN_LEN: usize = 5;
pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    Required,
    TooShort { min: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub model: &'static str,
    pub field: &'static str,
    pub reason: Reason,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { model, field, reason } = self;
        match reason {
            Reason::Required => write!(f, "{model} validation failed: {field}: Path `{field}` is required."),
            Reason::TooShort { min } => write!(
                f,
                "{model} validation failed: {field}: Path `{field}` is shorter than the minimum allowed length ({min})."
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// An empty string counts as missing.
pub fn required_min_len<'a>(
    model: &'static str,
    field: &'static str,
    value: Option<&'a str>,
    min: usize,
) -> Result<&'a str, ValidationError> {
    let error = |reason| ValidationError { model, field, reason };

    match value {
        None | Some("") => Err(error(Reason::Required)),
        Some(value) if value.chars().count() < min => Err(error(Reason::TooShort { min })),
        Some(value) => Ok(value),
    }
}

pub fn note_content(content: Option<&str>) -> Result<&str, ValidationError> {
    required_min_len("Note", "content", content, NOTE_CONTENT_MIN_LEN)
}

pub fn username(username: Option<&str>) -> Result<&str, ValidationError> {
    required_min_len("User", "username", username, USERNAME_MIN_LEN)
}

pub fn password(password: Option<&str>) -> Result<&str, ValidationError> {
    required_min_len("User", "password", password, PASSWORD_MIN_LEN)
}
