use http::header::CONTENT_TYPE;
use http::{Response, StatusCode};
use hyperitem_command::CONTENT_TYPE_HYPER_ITEM_UTF8;
use hyperitem_document::{Error, Item};
use tracing::error;

use crate::error::HttpError;

/// Serialize `item` as a hyper-item response.
pub fn item_response(status: StatusCode, item: &Item) -> Response<Vec<u8>> {
    match serde_json::to_vec(item) {
        Ok(body) => hyper_item(status, body),
        Err(e) => {
            error!(error = %e, "failed to encode item");
            hyper_item(
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"errors":[{"message":"failed to encode item"}]}"#.to_vec(),
            )
        }
    }
}

/// An item carrying a single error entry.
pub fn error_response(err: &HttpError) -> Response<Vec<u8>> {
    let status = err.status_code();
    let item = Item {
        errors: vec![Error {
            message: err.to_string(),
            code: status.as_u16().to_string(),
            ..Error::default()
        }],
        ..Item::default()
    };
    item_response(status, &item)
}

fn hyper_item(status: StatusCode, body: Vec<u8>) -> Response<Vec<u8>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, CONTENT_TYPE_HYPER_ITEM_UTF8)
        .body(body)
        .unwrap()
}
