use crate::errors::CoreError;
use crate::models::watchlist::WatchlistDocument;

/// Default file name of the document, relative to the working directory.
pub const DEFAULT_FILE_NAME: &str = "data.json";

/// Serialize a document to the on-disk representation.
///
/// Layout: pretty-printed JSON with 2-space indentation, e.g.
/// ```text
/// {
///   "watchlist": [ { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" } ],
///   "portfolio": []
/// }
/// ```
pub fn encode(document: &WatchlistDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
}

/// Parse the on-disk representation.
///
/// Missing `watchlist`/`portfolio` keys default to empty sequences; anything
/// that is not a JSON object of that shape is rejected.
pub fn decode(data: &str) -> Result<WatchlistDocument, CoreError> {
    serde_json::from_str(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to parse document: {e}")))
}
