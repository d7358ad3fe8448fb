//! Identity-provider webhook receiver.
//!
//! ```text
//! POST /api/webhooks  (raw JSON body, svix-id / svix-timestamp / svix-signature)
//! ```
//!
//! The body is taken as raw bytes because the signature covers it verbatim.

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::WebhookHeaders;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Signing header names, preferred first.
const ID_HEADERS: [&str; 2] = ["svix-id", "webhook-id"];
const TIMESTAMP_HEADERS: [&str; 2] = ["svix-timestamp", "webhook-timestamp"];
const SIGNATURE_HEADERS: [&str; 2] = ["svix-signature", "webhook-signature"];

/// Acknowledgement body for accepted deliveries.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Webhook received")]
    pub message: String,
}

impl WebhookAck {
    fn received() -> Self {
        Self {
            success: true,
            message: "Webhook received".to_owned(),
        }
    }
}

fn first_header(req: &HttpRequest, names: [&str; 2]) -> Option<String> {
    names.iter().find_map(|name| {
        req.headers()
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    })
}

fn signing_headers(req: &HttpRequest) -> WebhookHeaders {
    WebhookHeaders {
        id: first_header(req, ID_HEADERS),
        timestamp: first_header(req, TIMESTAMP_HEADERS),
        signature: first_header(req, SIGNATURE_HEADERS),
    }
}

/// Receive a signed identity-provider event.
///
/// `user.created` events create a user; redeliveries and other event kinds
/// are acknowledged without changes.
#[utoipa::path(
    post,
    path = "/api/webhooks",
    request_body(content = String, content_type = "application/json", description = "Signed event payload"),
    params(
        ("svix-id" = String, Header, description = "Delivery identifier"),
        ("svix-timestamp" = String, Header, description = "Unix timestamp of the delivery"),
        ("svix-signature" = String, Header, description = "Space-separated `v1,<base64>` signatures")
    ),
    responses(
        (status = 200, description = "Webhook received", body = WebhookAck),
        (status = 400, description = "Verification failed or invalid payload", body = ErrorSchema),
        (status = 500, description = "Failed to persist user", body = ErrorSchema)
    ),
    tags = ["webhooks"],
    operation_id = "receiveWebhook"
)]
#[post("/webhooks")]
pub async fn receive_webhook(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<WebhookAck>> {
    let headers = signing_headers(&req);
    state.webhooks.ingest(&body, &headers).await?;
    Ok(web::Json(WebhookAck::received()))
}
