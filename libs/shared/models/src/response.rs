use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope used by every endpoint: `{ "success": true, "data": … }`.
/// The failure side lives in [`crate::error::AppError`].
pub fn success<T: Serialize>(data: T) -> Value {
    json!({
        "success": true,
        "data": data
    })
}
