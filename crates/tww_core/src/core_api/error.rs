use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    /// The input buffer is not a save container this crate understands.
    Format,
    /// A slot, field or byte range falls outside the buffer or field width.
    Range,
    /// Text naming a field or an item could not be interpreted.
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Format, message)
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Range, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Parse, message)
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
