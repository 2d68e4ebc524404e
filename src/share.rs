//! Shareable link tokens.
//!
//! Encodes the slip tuple as stable JSON wrapped in URL-safe base64
//! (standard alphabet with `+`→`-`, `/`→`_`, padding stripped) so it can
//! ride in a URL fragment. Decoding tolerates padded variants and turns
//! every malformed token into `SlipError::DecodeFailure` instead of
//! propagating a parse panic to the UI.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::debug;

use crate::types::{SharePayload, SlipError};

/// Encode a share payload into a compact URL-safe token.
pub fn encode_share(payload: &SharePayload) -> String {
    // String/array-only payload; JSON serialization cannot fail here.
    let json = serde_json::to_vec(payload).expect("share payload serializes to JSON");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a share token back into its payload.
///
/// Accepts both unpadded tokens (what `encode_share` emits) and padded
/// ones produced by older encoders.
pub fn decode_share(token: &str) -> Result<SharePayload, SlipError> {
    let trimmed = token.trim().trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(trimmed).map_err(|e| {
        debug!(error = %e, "Share token is not valid base64");
        SlipError::DecodeFailure
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "Share token payload is not valid JSON");
        SlipError::DecodeFailure
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
