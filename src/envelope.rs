use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response}
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseCode {
    UserNotFound,
    InvalidTimeToken
}

/// Uniform wrapper every endpoint returns. Handled failures are normal
/// responses carrying a symbolic code, not HTTP error statuses.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum Envelope<T> {
    Ok { data: T },
    Error { code: ResponseCode }
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Envelope<T> {
        Envelope::Ok { data }
    }

    pub fn error(code: ResponseCode) -> Envelope<T> {
        Envelope::Error { code }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use serde_json::json;

    #[test]
    fn serialize_ok() {
        assert_eq!(
            serde_json::to_value(Envelope::ok(json!({ "unit": 2 }))).unwrap(),
            json!({ "result": "ok", "data": { "unit": 2 } })
        );
    }

    #[test]
    fn serialize_error() {
        assert_eq!(
            serde_json::to_value(
                Envelope::<()>::error(ResponseCode::UserNotFound)
            ).unwrap(),
            json!({ "result": "error", "code": "userNotFound" })
        );
    }

    #[test]
    fn serialize_invalid_time_token() {
        assert_eq!(
            serde_json::to_value(
                Envelope::<()>::error(ResponseCode::InvalidTimeToken)
            ).unwrap(),
            json!({ "result": "error", "code": "invalidTimeToken" })
        );
    }
}
