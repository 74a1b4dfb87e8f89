//! Stripe webhook signature verification.
//!
//! Verifies `Stripe-Signature` headers using HMAC-SHA256 over
//! `"{timestamp}." ++ raw_body`, compares in constant time, and rejects
//! timestamps outside a tolerance window to limit replay.

use std::time::Duration;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Default tolerance for signature timestamps (5 minutes).
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signatures (HMAC-SHA256). Several are sent while a secret is rolled.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...]`. Other
    /// schemes such as `v0` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| WebhookError::MalformedHeader("invalid header format".to_string()))?;

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signatures.push(hex::decode(value.trim()).map_err(|_| {
                        WebhookError::MalformedHeader("invalid v1 signature hex".to_string())
                    })?);
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::MalformedHeader(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
#[derive(Clone)]
pub struct WebhookVerifier {
    /// The webhook signing secret (whsec_...).
    secret: SecretString,
    /// Maximum distance between the signature timestamp and now.
    tolerance: Duration,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret and the default tolerance.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Overrides the timestamp tolerance.
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Verifies the signature against the current time and parses the event.
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` - Header cannot be parsed
    /// - `InvalidSignature` - No v1 signature matches
    /// - `TimestampOutOfTolerance` - Signature is too old or too far in the future
    /// - `ParseError` - Payload is not a valid event
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        self.verify_and_parse_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Same as [`Self::verify_and_parse`] with an explicit clock.
    pub fn verify_and_parse_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        self.verify_at(payload, signature_header, now)?;

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Checks the signature and timestamp without parsing the payload.
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        let expected = self.compute_signature(header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        let age_secs = now.abs_diff(header.timestamp);
        if age_secs > self.tolerance.as_secs() {
            return Err(WebhookError::TimestampOutOfTolerance { age_secs });
        }

        Ok(())
    }

    /// Produces a `t=...,v1=...` header for `payload`, as Stripe would send it.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        let signature = self.compute_signature(timestamp, payload)?;
        Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
    }

    /// Computes the HMAC-SHA256 signature for the given timestamp and payload.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_704_067_200;

    const SUCCEEDED_PAYLOAD: &str = r#"{"id":"evt_test123","type":"payment_intent.succeeded","created":1704067200,"livemode":false,"data":{"object":{"id":"pi_1","amount":1000,"currency":"usd"}}}"#;

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    /// Reference signature computed independently of `WebhookVerifier`.
    fn reference_signature(secret: &str, timestamp: i64, payload: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, payload);
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_single_v1() {
        let header_str = format!("t=1234567890,v1={}", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
    }

    #[test]
    fn parse_header_with_multiple_v1_and_v0() {
        let header_str = format!(
            "t=1234567890,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        );

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_tolerates_whitespace() {
        let header_str = format!("t=1234567890, v1={}", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header_str = format!("t=1234567890,v1={},v2=future,scheme=hmac", "a".repeat(64));

        assert!(SignatureHeader::parse(&header_str).is_ok());
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let header_str = format!("v1={}", "a".repeat(64));

        let result = SignatureHeader::parse(&header_str);

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_only_v0_fails() {
        let header_str = format!("t=1234567890,v0={}", "a".repeat(64));

        let result = SignatureHeader::parse(&header_str);

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_invalid_timestamp_fails() {
        let header_str = format!("t=not_a_number,v1={}", "a".repeat(64));

        let result = SignatureHeader::parse(&header_str);

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=not_valid_hex");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_no_equals_fails() {
        let result = SignatureHeader::parse("t1234567890");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_empty_header_fails() {
        assert!(SignatureHeader::parse("").is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let signature = reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={}", NOW, signature);

        let event = verifier()
            .verify_and_parse_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW)
            .unwrap();

        assert_eq!(event.id, "evt_test123");
        assert_eq!(event.event_type, "payment_intent.succeeded");
    }

    #[test]
    fn sign_matches_reference_signature() {
        let header = verifier().sign(NOW, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();

        assert_eq!(
            header,
            format!(
                "t={},v1={}",
                NOW,
                reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD)
            )
        );
    }

    #[test]
    fn verify_accepts_any_matching_v1() {
        let good = reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={},v1={}", NOW, "a".repeat(64), good);

        let result = verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn verify_invalid_signature_fails() {
        let header = format!("t={},v1={}", NOW, "a".repeat(64));

        let result = verifier().verify_and_parse_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_truncated_signature_fails() {
        let signature = reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={}", NOW, &signature[..32]);

        let result = verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let signature = reference_signature("whsec_other", NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={}", NOW, signature);

        let result = verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let signature = reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={}", NOW, signature);
        let tampered = SUCCEEDED_PAYLOAD.replace("1000", "1");

        let result = verifier().verify_at(tampered.as_bytes(), &header, NOW);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_swapped_timestamp_fails() {
        // The timestamp is part of the signed content
        let signature = reference_signature(TEST_SECRET, NOW, SUCCEEDED_PAYLOAD);
        let header = format!("t={},v1={}", NOW + 1, signature);

        let result = verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_non_utf8_payload_uses_raw_bytes() {
        let payload = [0xff, 0xfe, b'{', b'}'];
        let header = verifier().sign(NOW, &payload).unwrap();

        assert!(verifier().verify_at(&payload, &header, NOW).is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Tolerance Tests
    // ══════════════════════════════════════════════════════════════

    fn verify_with_age(age: i64) -> Result<(), WebhookError> {
        let timestamp = NOW - age;
        let header = verifier().sign(timestamp, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();
        verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW)
    }

    #[test]
    fn verify_timestamp_within_range_succeeds() {
        assert!(verify_with_age(120).is_ok());
    }

    #[test]
    fn verify_timestamp_at_boundary_succeeds() {
        assert!(verify_with_age(300).is_ok());
    }

    #[test]
    fn verify_timestamp_just_past_boundary_fails() {
        assert!(matches!(
            verify_with_age(301),
            Err(WebhookError::TimestampOutOfTolerance { age_secs: 301 })
        ));
    }

    #[test]
    fn verify_timestamp_from_future_beyond_tolerance_fails() {
        assert!(matches!(
            verify_with_age(-301),
            Err(WebhookError::TimestampOutOfTolerance { age_secs: 301 })
        ));
    }

    #[test]
    fn verify_timestamp_slightly_in_future_succeeds() {
        assert!(verify_with_age(-30).is_ok());
    }

    #[test]
    fn custom_tolerance_is_applied() {
        let strict = verifier().with_tolerance(Duration::from_secs(10));
        let header = strict.sign(NOW - 11, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();

        let result = strict.verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, NOW);

        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfTolerance { .. })
        ));
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let header = verifier().sign(i64::MIN, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();

        let result = verifier().verify_at(SUCCEEDED_PAYLOAD.as_bytes(), &header, i64::MAX);

        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfTolerance { .. })
        ));
    }

    #[test]
    fn verify_with_wall_clock() {
        let now = chrono::Utc::now().timestamp();
        let header = verifier().sign(now, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();

        let result = verifier().verify_and_parse(SUCCEEDED_PAYLOAD.as_bytes(), &header);

        assert!(result.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // JSON Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_invalid_json_fails_after_signature_check() {
        let payload = b"not valid json";
        let header = verifier().sign(NOW, payload).unwrap();

        let result = verifier().verify_and_parse_at(payload, &header, NOW);

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5]));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 6]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }

    proptest! {
        #[test]
        fn any_single_byte_tamper_is_rejected(index in 0usize..SUCCEEDED_PAYLOAD.len(), flip in 1u8..=255) {
            let header = verifier().sign(NOW, SUCCEEDED_PAYLOAD.as_bytes()).unwrap();
            let mut tampered = SUCCEEDED_PAYLOAD.as_bytes().to_vec();
            tampered[index] ^= flip;

            let result = verifier().verify_at(&tampered, &header, NOW);

            prop_assert_eq!(result, Err(WebhookError::InvalidSignature));
        }
    }
}
