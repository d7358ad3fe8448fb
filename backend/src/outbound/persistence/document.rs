//! BSON to JSON conversion for schemaless quiz documents.

use mongodb::bson::{Bson, Document};
use serde_json::Value;

use crate::domain::QuizDocument;

/// Render a stored document as a JSON object.
///
/// Values use relaxed extended JSON, except a top-level `_id` ObjectId,
/// which becomes its hex string.
pub(super) fn to_quiz_document(mut document: Document) -> QuizDocument {
    if let Some(Bson::ObjectId(id)) = document.get("_id") {
        let hex = id.to_hex();
        document.insert("_id", Bson::String(hex));
    }
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        other => {
            let mut map = QuizDocument::new();
            map.insert("value".to_owned(), other);
            map
        }
    }
}
