//! Unpadded URL-safe base64, the text form of every opaque value on the wire.
//!
//! The alphabet is `A-Z a-z 0-9 - _`. It never produces `:`, which is what
//! lets typed values and key pairs use `:` as a delimiter.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::VeilidError;

const PADDING: char = '=';
const BLOCK_LEN: usize = 4;

/// Encodes `bytes` without trailing `=` padding.
pub fn encode_no_pad(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Restores the padding implied by the input length and decodes.
pub fn decode_no_pad(text: &str) -> Result<Vec<u8>, VeilidError> {
    if text.contains(PADDING) {
        return Err(VeilidError::malformed_encoding("padding character in unpadded input"));
    }

    let padding = (BLOCK_LEN - text.len() % BLOCK_LEN) % BLOCK_LEN;
    if padding == BLOCK_LEN - 1 {
        return Err(VeilidError::malformed_encoding(format!(
            "length {} is not a valid unpadded length",
            text.len()
        )));
    }

    let mut padded = String::with_capacity(text.len() + padding);
    padded.push_str(text);
    padded.extend(std::iter::repeat(PADDING).take(padding));
    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);

    URL_SAFE.decode(padded).map_err(|err| VeilidError::malformed_encoding(err.to_string()))
}
