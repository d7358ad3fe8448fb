//! Scan classification handler.
//!
//! ```text
//! POST /predict  (multipart/form-data, file field "image")
//! ```

use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Classification, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Classification result returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    #[schema(example = "Kidney")]
    pub label: String,
    /// Percentage with two decimals.
    #[schema(example = "97.42%")]
    pub confidence: String,
}

impl From<Classification> for PredictionResponse {
    fn from(value: Classification) -> Self {
        Self {
            label: value.label().to_string(),
            confidence: value.confidence().to_string(),
        }
    }
}

/// OpenAPI form body for `/predict`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PredictionUpload {
    /// Image file (any format the decoder recognises).
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

fn malformed_body(err: &MultipartError) -> Error {
    Error::invalid_request("Malformed multipart body").with_details(json!({ "reason": err.to_string() }))
}

/// Read the first non-empty `image` field, enforcing `limit` on bytes read.
///
/// A body that never yields a part (an empty form, or no recognisable
/// boundary) carries no image; stream errors after that are malformed input.
async fn read_image(mut payload: Multipart, limit: usize) -> ApiResult<Option<Vec<u8>>> {
    let mut consumed = 0_usize;
    let mut parts = 0_usize;
    let mut image = None;
    while let Some(field) = payload.next().await {
        let mut field = match field {
            Ok(field) => field,
            Err(_) if parts == 0 => return Ok(None),
            Err(err) => return Err(malformed_body(&err)),
        };
        parts += 1;
        let wanted = image.is_none() && field.name() == Some(IMAGE_FIELD);
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| malformed_body(&err))?;
            consumed = consumed.saturating_add(chunk.len());
            if consumed > limit {
                return Err(Error::payload_too_large("Uploaded image is too large")
                    .with_details(json!({ "limitBytes": limit })));
            }
            if wanted {
                bytes.extend_from_slice(&chunk);
            }
        }
        if wanted && !bytes.is_empty() {
            image = Some(bytes);
        }
    }
    Ok(image)
}

/// Classify an uploaded scan as kidney or lung.
///
/// The model must have finished loading; this is checked before the upload
/// is read.
#[utoipa::path(
    post,
    path = "/predict",
    request_body(content = PredictionUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Classification", body = PredictionResponse),
        (status = 400, description = "No image uploaded or malformed body", body = ErrorSchema),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorSchema),
        (status = 500, description = "Model not loaded or prediction failed", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "predict"
)]
#[post("/predict")]
pub async fn predict(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<PredictionResponse>> {
    state.predictions.ensure_ready()?;
    let image = read_image(payload, state.upload_limit)
        .await?
        .ok_or_else(|| Error::invalid_request("No image uploaded"))?;
    let classification = state.predictions.predict(image).await?;
    Ok(web::Json(classification.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, ErrorCode};
    use crate::inbound::http::test_utils::{RecordingPrediction, StateBuilder};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    const BOUNDARY: &str = "medquiz-test-boundary";

    fn multipart_body(fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, content) in fields {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match filename {
                Some(file) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn ready_prediction() -> RecordingPrediction {
        RecordingPrediction::new(
            Ok(()),
            Ok(Classification::from_scores(&[0.9, 0.1]).expect("scores")),
        )
    }

    async fn post(prediction: &RecordingPrediction, body: Vec<u8>, limit: usize) -> (StatusCode, Value) {
        let state = StateBuilder::default()
            .predictions(prediction.clone())
            .build()
            .with_upload_limit(limit);
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(predict),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/predict")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn classifies_uploaded_image() {
        let prediction = ready_prediction();
        let body = multipart_body(&[
            ("note", None, b"ignored".as_slice()),
            ("image", Some("scan.png"), b"png-bytes".as_slice()),
        ]);

        let (status, json) = post(&prediction, body, 1024).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "label": "Kidney", "confidence": "90.00%" }));
        assert_eq!(prediction.uploads(), vec![b"png-bytes".to_vec()]);
    }

    #[rstest]
    #[case::no_fields(multipart_body(&[]))]
    #[case::no_boundary(b"--wrong-boundary\r\n".to_vec())]
    #[case::other_field(multipart_body(&[("file", Some("scan.png"), b"png-bytes".as_slice())]))]
    #[case::empty_file(multipart_body(&[("image", Some("scan.png"), b"".as_slice())]))]
    #[actix_web::test]
    async fn missing_image_is_bad_request(#[case] body: Vec<u8>) {
        let prediction = ready_prediction();
        let (status, json) = post(&prediction, body, 1024).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "No image uploaded");
        assert!(prediction.uploads().is_empty());
    }

    #[rstest]
    #[case::valid(multipart_body(&[("image", Some("scan.png"), b"png-bytes".as_slice())]))]
    #[case::empty(multipart_body(&[]))]
    #[case::garbage(b"not multipart at all".to_vec())]
    #[actix_web::test]
    async fn model_not_loaded_wins_over_input_errors(#[case] body: Vec<u8>) {
        let prediction = RecordingPrediction::new(
            Err(Error::internal("Model not loaded")),
            Err(Error::internal("Model not loaded")),
        );
        let (status, json) = post(&prediction, body, 1024).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Model not loaded");
        assert!(prediction.uploads().is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_upload_is_rejected() {
        let prediction = ready_prediction();
        let body = multipart_body(&[("image", Some("scan.png"), [7_u8; 64].as_slice())]);
        let (status, json) = post(&prediction, body, 16).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["code"], "payload_too_large");
        assert!(prediction.uploads().is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn truncated_multipart_is_bad_request() {
        let prediction = ready_prediction();
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n\
             --{BOUNDARY}\r\nContent-Disposition: form-da"
        );
        let (status, json) = post(&prediction, body.into_bytes(), 1024).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "invalid_request");
        assert_eq!(json["message"], "Malformed multipart body");
        assert!(prediction.uploads().is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn prediction_failure_keeps_fixed_message() {
        let prediction = RecordingPrediction::new(
            Ok(()),
            Err(Error::internal("Prediction failed").with_details(serde_json::json!({ "stage": "decode" }))),
        );
        let body = multipart_body(&[("image", Some("scan.png"), b"not-an-image".as_slice())]);
        let (status, json) = post(&prediction, body, 1024).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], serde_json::to_value(ErrorCode::InternalError).expect("code"));
        assert_eq!(json["message"], "Prediction failed");
        assert!(json.get("details").is_none());
    }
}
