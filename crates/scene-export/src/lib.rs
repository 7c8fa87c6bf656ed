pub mod document;
pub mod errors;
pub mod record;
pub mod serialize;

pub use document::{parse_document, to_json_pretty, ModelDocument, ObjectRecord};
pub use errors::ExportError;
pub use record::{ExportPoint, ExportRecord};
pub use serialize::{
    export_model, export_model_with, extract_children, extract_children_with,
    extract_model_objects, extract_model_objects_with, serialize_entity, serialize_entity_with,
    TraversalLimits,
};
