use thiserror::Error;

/// Errors produced while exporting a scene or parsing an exported document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// A definition was reached again through its own children. Walking
    /// further would never terminate, so the export is abandoned.
    #[error("definition '{definition}' contains itself")]
    DefinitionCycle { definition: String },

    /// The traversal produced more records, or nested deeper, than the
    /// configured budget allows.
    #[error("traversal budget of {limit} exceeded")]
    BudgetExceeded { limit: usize },

    /// An entity or definition handle did not resolve in the scene.
    #[error("export reached a handle that is not in the scene")]
    DanglingReference,

    /// The document text could not be parsed.
    #[error("failed to parse document: {0}")]
    ParseError(String),
}
