//! Notification Payload Encoding
//!
//! A chunk travels as a flat run of little-endian scalars with no header.
//! The receiver parses `payload.len() / WIDTH` values and ignores any
//! trailing partial scalar.
//!
//! ```text
//! chunk of 3 f32 values:
//! ┌──────────────┬──────────────┬──────────────┐
//! │ ch0 (4B, LE) │ ch1 (4B, LE) │ ch2 (4B, LE) │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use eegstream_core::codec::{ChunkEncoder, decode_payload};
//!
//! let mut encoder = ChunkEncoder::new();
//! encoder.push(1.5f32).unwrap();
//! encoder.push(-2.0f32).unwrap();
//!
//! let values: Vec<f32> = decode_payload(encoder.as_bytes()).collect();
//! assert_eq!(values, vec![1.5, -2.0]);
//! ```

use crate::constants::MAX_PAYLOAD_BYTES;
use crate::errors::{ConfigError, ConfigResult};

/// Payload buffer sized for the largest ATT MTU
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_BYTES>;

/// Fixed-width value that can be placed in a notification
///
/// Implemented for the float and integer types recordings use, and for
/// `fixed::types::I16F16` with the `fixed` feature.
pub trait Scalar: Copy {
    /// Encoded size in bytes
    const WIDTH: usize;

    /// Write `WIDTH` little-endian bytes into `out`
    fn write_le(&self, out: &mut [u8]);

    /// Read a value from the first `WIDTH` bytes of `bytes`
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty => $width:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIDTH: usize = $width;

                fn write_le(&self, out: &mut [u8]) {
                    out[..$width].copy_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; $width];
                    raw.copy_from_slice(&bytes[..$width]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_scalar!(f32 => 4, i16 => 2, i32 => 4, u16 => 2);

#[cfg(feature = "fixed")]
impl_scalar!(fixed::types::I16F16 => 4);

/// Builds one notification payload scalar by scalar
#[derive(Debug, Clone, Default)]
pub struct ChunkEncoder {
    payload: Payload,
    scalars: usize,
}

impl ChunkEncoder {
    /// Empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one scalar
    ///
    /// Fails without modifying the payload when the value does not fit.
    pub fn push<T: Scalar>(&mut self, value: T) -> ConfigResult<()> {
        let start = self.payload.len();
        self.payload
            .resize(start + T::WIDTH, 0)
            .map_err(|_| ConfigError::ChunkCapacity {
                capacity: self.scalars + 1,
                max: MAX_PAYLOAD_BYTES / T::WIDTH,
            })?;
        value.write_le(&mut self.payload[start..]);
        self.scalars += 1;
        Ok(())
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Scalars pushed so far
    pub fn scalars(&self) -> usize {
        self.scalars
    }

    /// Whether nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.scalars == 0
    }

    /// Take the finished payload
    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

/// Encode a slice of scalars into a payload
pub fn encode_chunk<T: Scalar>(values: &[T]) -> ConfigResult<Payload> {
    let mut encoder = ChunkEncoder::new();
    for value in values {
        encoder.push(*value)?;
    }
    Ok(encoder.into_payload())
}

/// Decode a received payload, ignoring a trailing partial scalar
pub fn decode_payload<'a, T: Scalar + 'a>(bytes: &'a [u8]) -> impl Iterator<Item = T> + 'a {
    bytes.chunks_exact(T::WIDTH).map(T::read_le)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_are_little_endian() {
        let payload = encode_chunk(&[1.0f32]).unwrap();
        assert_eq!(payload.as_slice(), &[0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn trailing_partial_scalar_ignored() {
        let mut bytes = encode_chunk(&[3.25f32, 4.5]).unwrap();
        bytes.push(0xAA).unwrap();

        let values: Vec<f32> = decode_payload(&bytes).collect();
        assert_eq!(values, vec![3.25, 4.5]);
    }

    #[test]
    fn encoder_rejects_overflow_without_corrupting() {
        let mut encoder = ChunkEncoder::new();
        for i in 0..(MAX_PAYLOAD_BYTES / 4) {
            encoder.push(i as i32).unwrap();
        }
        let before = encoder.as_bytes().len();

        assert!(matches!(
            encoder.push(7i32),
            Err(ConfigError::ChunkCapacity { .. })
        ));
        assert_eq!(encoder.as_bytes().len(), before);
        assert_eq!(encoder.scalars(), MAX_PAYLOAD_BYTES / 4);
    }

    #[test]
    fn narrow_scalars() {
        let payload = encode_chunk(&[-2i16, 0x0102]).unwrap();
        assert_eq!(payload.as_slice(), &[0xFE, 0xFF, 0x02, 0x01]);

        let decoded: Vec<i16> = decode_payload(&payload).collect();
        assert_eq!(decoded, vec![-2, 0x0102]);
    }
}
