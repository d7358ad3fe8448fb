//! Svix-style webhook signature verification.
//!
//! Signed content is `{id}.{timestamp}.{body}`, authenticated with
//! HMAC-SHA256 under the shared secret. The signature header carries one or
//! more space-separated `v1,<base64>` entries; any match is accepted.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use mockable::{Clock, DefaultClock};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::ports::{
    WebhookEvent, WebhookHeaders, WebhookVerificationError, WebhookVerifier,
};

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";
/// Accepted clock skew between the sender and this service.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Errors raised while parsing the shared signing secret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookSecretError {
    #[error("webhook secret is empty")]
    Empty,
    #[error("webhook secret is not valid base64: {message}")]
    Encoding { message: String },
}

/// Decoded signing secret; the key bytes are wiped on drop.
#[derive(Clone)]
pub struct WebhookSecret {
    key: Zeroizing<Vec<u8>>,
    mac: HmacSha256,
}

impl WebhookSecret {
    /// Parse a `whsec_<base64>` secret. The prefix is optional.
    ///
    /// # Examples
    /// ```
    /// use medquiz::outbound::webhook::WebhookSecret;
    ///
    /// let secret = WebhookSecret::parse("whsec_c2VjcmV0").expect("valid secret");
    /// assert_eq!(secret.fingerprint().len(), 16);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, WebhookSecretError> {
        let trimmed = raw.trim();
        let encoded = trimmed.strip_prefix(SECRET_PREFIX).unwrap_or(trimmed);
        if encoded.is_empty() {
            return Err(WebhookSecretError::Empty);
        }
        let key = STANDARD
            .decode(encoded)
            .map_err(|err| WebhookSecretError::Encoding {
                message: err.to_string(),
            })?;
        let key = Zeroizing::new(key);
        if key.is_empty() {
            return Err(WebhookSecretError::Empty);
        }
        let mac = HmacSha256::new_from_slice(key.as_slice()).map_err(|err| {
            WebhookSecretError::Encoding {
                message: err.to_string(),
            }
        })?;
        Ok(Self { key, mac })
    }

    /// Short SHA-256 fingerprint, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.key.as_slice());
        let mut encoded = hex::encode(digest);
        encoded.truncate(16);
        encoded
    }

    fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSecret")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Verifies deliveries signed with a shared [`WebhookSecret`].
#[derive(Clone)]
pub struct SvixWebhookVerifier {
    secret: WebhookSecret,
    clock: Arc<dyn Clock>,
    tolerance: Duration,
}

impl SvixWebhookVerifier {
    pub fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            clock: Arc::new(DefaultClock),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Base64 signature for `payload` as the sender would compute it.
    pub fn sign(&self, id: &str, timestamp: i64, payload: &[u8]) -> String {
        let mac = self.signed_content(id, &timestamp.to_string(), payload);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    fn signed_content(&self, id: &str, timestamp: &str, payload: &[u8]) -> HmacSha256 {
        let mut mac = self.secret.mac();
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac
    }

    fn check_timestamp(&self, raw: &str) -> Result<(), WebhookVerificationError> {
        let sent: i64 = raw
            .trim()
            .parse()
            .map_err(|_| WebhookVerificationError::invalid_timestamp())?;
        let now = self.clock.utc().timestamp();
        let skew = now.abs_diff(sent);
        if skew > self.tolerance.as_secs() {
            return Err(WebhookVerificationError::timestamp_out_of_tolerance());
        }
        Ok(())
    }

    fn check_signature(
        &self,
        id: &str,
        timestamp: &str,
        payload: &[u8],
        header: &str,
    ) -> Result<(), WebhookVerificationError> {
        let mac = self.signed_content(id, timestamp, payload);
        let matched = header
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, signature)| STANDARD.decode(signature).ok())
            .any(|expected| mac.clone().verify_slice(&expected).is_ok());
        if matched {
            Ok(())
        } else {
            Err(WebhookVerificationError::invalid_signature())
        }
    }
}

fn required<'a>(
    value: Option<&'a String>,
    name: &str,
) -> Result<&'a str, WebhookVerificationError> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WebhookVerificationError::missing_header(name))
}

impl WebhookVerifier for SvixWebhookVerifier {
    fn verify(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookEvent, WebhookVerificationError> {
        let id = required(headers.id.as_ref(), "svix-id")?;
        let timestamp = required(headers.timestamp.as_ref(), "svix-timestamp")?;
        let signature = required(headers.signature.as_ref(), "svix-signature")?;

        self.check_timestamp(timestamp)?;
        self.check_signature(id, timestamp, payload, signature)?;

        serde_json::from_slice(payload)
            .map_err(|err| WebhookVerificationError::malformed_payload(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    const NOW: i64 = 1_700_000_000;
    const BODY: &[u8] = br#"{"type":"user.created","data":{"id":"user_1"}}"#;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn verifier() -> SvixWebhookVerifier {
        let secret = WebhookSecret::parse("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")
            .expect("valid secret");
        let now = Utc.timestamp_opt(NOW, 0).single().expect("valid timestamp");
        SvixWebhookVerifier::new(secret).with_clock(Arc::new(FixedClock(now)))
    }

    fn headers(timestamp: i64, signature: String) -> WebhookHeaders {
        WebhookHeaders {
            id: Some("msg_1".into()),
            timestamp: Some(timestamp.to_string()),
            signature: Some(signature),
        }
    }

    #[rstest]
    fn accepts_valid_signature(verifier: SvixWebhookVerifier) {
        let signature = format!("v1,{}", verifier.sign("msg_1", NOW, BODY));
        let event = verifier
            .verify(BODY, &headers(NOW, signature))
            .expect("valid delivery");
        assert_eq!(event.kind, "user.created");
        assert_eq!(event.data["id"], "user_1");
    }

    #[rstest]
    fn signs_published_svix_vector() {
        let secret = WebhookSecret::parse("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")
            .expect("valid secret");
        let verifier = SvixWebhookVerifier::new(secret);
        assert_eq!(
            verifier.sign("msg_p5jXN8AQM9LWM0D4loKWxJek", 1_614_265_330, br#"{"test": 2432232314}"#),
            "g0hM9SsE+OTPJTGt/tmIKtSyZlE3uFJELVlNIOLJ1OE="
        );
    }

    #[rstest]
    fn accepts_any_matching_entry(verifier: SvixWebhookVerifier) {
        let good = verifier.sign("msg_1", NOW, BODY);
        let header = format!("v1,Zm9vYmFy v2,{good} v1,{good}");
        assert!(verifier.verify(BODY, &headers(NOW, header)).is_ok());
    }

    #[rstest]
    fn rejects_tampered_body(verifier: SvixWebhookVerifier) {
        let signature = format!("v1,{}", verifier.sign("msg_1", NOW, BODY));
        let tampered = br#"{"type":"user.created","data":{"id":"user_2"}}"#;
        assert_eq!(
            verifier.verify(tampered, &headers(NOW, signature)),
            Err(WebhookVerificationError::InvalidSignature)
        );
    }

    #[rstest]
    #[case(NOW - 301)]
    #[case(NOW + 301)]
    fn rejects_stale_or_future_timestamps(verifier: SvixWebhookVerifier, #[case] sent: i64) {
        let signature = format!("v1,{}", verifier.sign("msg_1", sent, BODY));
        assert_eq!(
            verifier.verify(BODY, &headers(sent, signature)),
            Err(WebhookVerificationError::TimestampOutOfTolerance)
        );
    }

    #[rstest]
    fn rejects_non_numeric_timestamp(verifier: SvixWebhookVerifier) {
        let mut h = headers(NOW, "v1,abc".into());
        h.timestamp = Some("yesterday".into());
        assert_eq!(
            verifier.verify(BODY, &h),
            Err(WebhookVerificationError::InvalidTimestamp)
        );
    }

    #[rstest]
    #[case(WebhookHeaders { id: None, ..headers(NOW, "v1,a".into()) }, "svix-id")]
    #[case(WebhookHeaders { timestamp: None, ..headers(NOW, "v1,a".into()) }, "svix-timestamp")]
    #[case(WebhookHeaders { signature: Some(String::new()), ..headers(NOW, "v1,a".into()) }, "svix-signature")]
    fn reports_missing_headers(
        verifier: SvixWebhookVerifier,
        #[case] h: WebhookHeaders,
        #[case] name: &str,
    ) {
        assert_eq!(
            verifier.verify(BODY, &h),
            Err(WebhookVerificationError::missing_header(name))
        );
    }

    #[rstest]
    fn authentic_non_event_payload_is_malformed(verifier: SvixWebhookVerifier) {
        let body = b"[1, 2, 3]";
        let signature = format!("v1,{}", verifier.sign("msg_1", NOW, body));
        let err = verifier
            .verify(body, &headers(NOW, signature))
            .expect_err("array is not an event");
        assert!(matches!(err, WebhookVerificationError::MalformedPayload { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("whsec_")]
    fn secret_rejects_empty(#[case] raw: &str) {
        assert_eq!(WebhookSecret::parse(raw).map(|_| ()), Err(WebhookSecretError::Empty));
    }

    #[rstest]
    fn secret_rejects_invalid_base64() {
        let err = WebhookSecret::parse("whsec_not base64!").expect_err("invalid base64");
        assert!(matches!(err, WebhookSecretError::Encoding { .. }));
    }

    #[rstest]
    fn secret_prefix_is_optional() {
        let with = WebhookSecret::parse("whsec_c2VjcmV0").expect("prefixed");
        let without = WebhookSecret::parse("c2VjcmV0").expect("bare");
        assert_eq!(with.fingerprint(), without.fingerprint());
        assert!(!format!("{with:?}").contains("c2VjcmV0"));
    }
}
