//! Reed-Solomon error correction over GF(256) for 2-D barcode readers.
//!
//! Implements the error-correction core shared by QR Code, Data Matrix and
//! Aztec readers: given a received codeword of data symbols followed by
//! `two_s` parity symbols, [`Decoder::decode`] detects up to `two_s` corrupted
//! symbols, corrects up to `two_s / 2` of them in place, or reports an
//! irrecoverable failure. [`Encoder::encode`] produces the parity tail.
//!
//! # Example
//!
//! ```
//! use barcode_ecc::{Decoder, Encoder, QR_CODE_FIELD};
//!
//! // 16 data symbols + 10 parity symbols.
//! let mut codeword = vec![0u8; 26];
//! codeword[..16].copy_from_slice(&[
//!     0x40, 0xd2, 0x75, 0x47, 0x76, 0x17, 0x32, 0x06,
//!     0x27, 0x26, 0x96, 0xc6, 0xc6, 0x96, 0x70, 0xec,
//! ]);
//! Encoder::new(&QR_CODE_FIELD).encode(&mut codeword, 10).unwrap();
//! let clean = codeword.clone();
//!
//! // Corrupt two symbols, then recover them.
//! codeword[3] ^= 0x55;
//! codeword[19] ^= 0x0a;
//! Decoder::new(&QR_CODE_FIELD).decode(&mut codeword, 10).unwrap();
//! assert_eq!(codeword, clean);
//! ```

pub mod decoder;
pub mod encoder;
pub mod field;
pub mod poly;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use field::{Field, DATA_MATRIX_FIELD, QR_CODE_FIELD};

/// Errors returned by encode/decode operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The received word holds more damage than the parity can undo.
    #[error("decode failed: {0}")]
    Decode(&'static str),

    /// A malformed argument from the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
