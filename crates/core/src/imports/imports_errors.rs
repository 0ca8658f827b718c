use thiserror::Error;

/// Errors raised while reading or mapping an import source.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{format}: header does not match ({})", describe_mismatch(.missing, .unexpected))]
    HeaderMismatch {
        format: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("{format}: column '{header}' appears more than once")]
    DuplicateColumn { format: String, header: String },

    #[error("The sheet has no header row")]
    EmptySheet,

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Failed to read sheet: {0}")]
    Read(String),

    #[error("Row {line}: {message}")]
    Row { line: usize, message: String },
}

impl ImportError {
    pub fn row(line: usize, message: impl Into<String>) -> Self {
        Self::Row {
            line,
            message: message.into(),
        }
    }
}

fn describe_mismatch(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing required columns: {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected columns: {}", unexpected.join(", ")));
    }
    parts.join("; ")
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Read(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Read(err.to_string())
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Read(err.to_string())
    }
}
