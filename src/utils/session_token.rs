//! Opaque session token generation.

use base64::Engine as _;

/// Random bytes per token before encoding.
const TOKEN_BYTES: usize = 32;

/// Generates a URL-safe, unpadded base64 token carrying 256 bits of entropy.
///
/// # Errors
///
/// Returns an error if the operating system RNG is unavailable.
pub fn generate_session_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
