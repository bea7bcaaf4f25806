//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT claims JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA signatures are typically 256-512 bytes, but we allow margin for larger keys
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;


/// Maximum number of random bytes in a generated `jti` (1KB)
pub(crate) const MAX_JTI_SIZE: usize = 1024;
