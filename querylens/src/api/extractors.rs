use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::QueryLensError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(QueryLensError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for QueryLensError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> QueryLensError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                QueryLensError::Validation(format!("Missing required field: {field}"))
            } else {
                QueryLensError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            QueryLensError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => QueryLensError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            QueryLensError::Internal("Failed to read request body".to_string())
        }
        _ => QueryLensError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_field() {
        assert_eq!(
            extract_missing_field(
                "Failed to deserialize the JSON body into the target type: missing field `query` at line 1 column 2"
            ),
            Some("query")
        );
        assert_eq!(extract_missing_field("expected a string"), None);
    }
}
