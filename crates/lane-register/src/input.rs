//! # Scan Input
//!
//! The two ways a code reaches the register. The original terminal's lookup
//! handler accepted either a form-submit event or a raw string through one
//! parameter; here the two cases are an explicit tagged variant.

/// A lookup trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    /// Operator confirmed the code currently typed into the entry field.
    ManualSubmit,

    /// The scanner decoded a code; carries the decoded string.
    ScannedCode(String),
}

impl ScanInput {
    /// Resolves to the code to look up, given the current entry-field text.
    pub fn code<'a>(&'a self, entry: &'a str) -> &'a str {
        match self {
            ScanInput::ManualSubmit => entry,
            ScanInput::ScannedCode(code) => code,
        }
    }
}
