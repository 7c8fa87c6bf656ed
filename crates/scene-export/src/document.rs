use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::record::{ExportPoint, ExportRecord};

/// One top-level object of an exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Definition name of the group or instance.
    pub name: String,
    /// Definition description, empty when the author left none.
    pub description: String,
    /// World-space origin as a bare `[x, y, z]` triple.
    pub exact_position: [f64; 3],
    /// The same origin with named components.
    pub position: ExportPoint,
    /// Records of the object's children, in definition order.
    pub entities: Vec<ExportRecord>,
}

/// The complete exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Scene name the export was taken from.
    pub model_name: String,
    /// One record per top-level group or instance, in root order.
    pub entities: Vec<ObjectRecord>,
}

/// Renders a document as pretty-printed JSON.
///
/// The document schema holds only plain values, so serialization cannot
/// fail for any document this crate produces.
pub fn to_json_pretty(document: &ModelDocument) -> String {
    serde_json::to_string_pretty(document).expect("ModelDocument serialization should never fail")
}

/// Parses a previously exported document back into memory.
pub fn parse_document(json: &str) -> Result<ModelDocument, ExportError> {
    serde_json::from_str(json).map_err(|e| ExportError::ParseError(e.to_string()))
}
