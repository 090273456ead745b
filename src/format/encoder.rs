use std::io::Write;
use std::path::Path;

use crate::error::{FormatError, Sn3Error};
use crate::format::element::ElementType;
use crate::tensor::{element_count, Tensor};

/// Serializes a shape and raw payload into SN3 bytes.
///
/// Reserved header bytes are written as zero. Fails if the rank exceeds 255,
/// a dimension does not fit in a u32, or `payload` is not exactly
/// `byte_width * product(dims)` bytes long. A short payload is reported as
/// truncated, a long one as a length mismatch.
pub fn encode_to_vec(
    element_type: ElementType,
    dims: &[usize],
    payload: &[u8],
) -> Result<Vec<u8>, FormatError> {
    let num_dims = u8::try_from(dims.len()).map_err(|_| FormatError::TooManyDims(dims.len()))?;
    let header_len = 4 + 4 * dims.len();
    let expected = element_count(dims)
        .and_then(|n| n.checked_mul(element_type.byte_width()))
        .ok_or_else(|| FormatError::PayloadOverflow { dims: dims.to_vec() })?;
    if payload.len() < expected {
        return Err(FormatError::Truncated {
            offset: header_len,
            needed: expected,
            available: payload.len(),
        });
    }
    if payload.len() > expected {
        return Err(FormatError::PayloadLength { expected, actual: payload.len() });
    }

    let mut out = Vec::with_capacity(header_len + payload.len());
    out.extend_from_slice(&[0, 0, element_type.code(), num_dims]);
    for &d in dims {
        let d = u32::try_from(d).map_err(|_| FormatError::DimensionTooLarge(d))?;
        out.extend_from_slice(&d.to_be_bytes());
    }
    out.extend_from_slice(payload);
    Ok(out)
}

/// Encodes a whole tensor.
pub fn encode_tensor(tensor: &Tensor) -> Result<Vec<u8>, FormatError> {
    encode_to_vec(tensor.element_type(), tensor.dims(), tensor.as_bytes())
}

/// Writes `tensor` to `path` as an SN3 file.
pub fn write_sn3_file(path: impl AsRef<Path>, tensor: &Tensor) -> Result<(), Sn3Error> {
    let path = path.as_ref();
    let bytes = encode_tensor(tensor).map_err(|e| Sn3Error::format(path, e))?;
    let io_err = |source: std::io::Error| Sn3Error::Io { path: path.to_path_buf(), source };
    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(&bytes).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::decoder::decode_bytes;

    #[test]
    fn header_layout() {
        let bytes = encode_to_vec(ElementType::UInt8, &[10, 1000], &vec![0u8; 10_000]).unwrap();
        assert_eq!(&bytes[..12], &[0, 0, 8, 2, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x03, 0xE8]);
        assert_eq!(bytes.len(), 12 + 10_000);
    }

    #[test]
    fn short_payload_is_truncated() {
        match encode_to_vec(ElementType::Int32, &[2], &[0u8; 7]) {
            Err(FormatError::Truncated { offset, needed, available }) => {
                assert_eq!((offset, needed, available), (8, 8, 7));
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn long_payload_is_a_length_mismatch() {
        let err = encode_to_vec(ElementType::UInt8, &[2], &[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, FormatError::PayloadLength { expected: 2, actual: 4 }));
        assert_eq!(err.to_string(), "payload is 4 bytes, expected exactly 2");
    }

    #[test]
    fn rank_above_255_is_rejected() {
        let dims = vec![1usize; 256];
        let err = encode_to_vec(ElementType::UInt8, &dims, &[0]).unwrap_err();
        assert!(matches!(err, FormatError::TooManyDims(256)));
        assert!(err.to_string().contains("255"));
        assert!(encode_to_vec(ElementType::UInt8, &dims[..255], &[0]).is_ok());
    }

    #[test]
    fn rejects_dimension_wider_than_u32() {
        let wide = u32::MAX as usize + 1;
        assert!(matches!(
            encode_to_vec(ElementType::UInt8, &[wide, 0], &[]),
            Err(FormatError::DimensionTooLarge(d)) if d == wide
        ));
    }

    #[test]
    fn tensor_survives_encoding() {
        let t = Tensor::from_vec(vec![2, 2], vec![0.5f64, -1.0, 3.25, 1e-9]).unwrap();
        let decoded = decode_bytes(&encode_tensor(&t).unwrap()).unwrap();
        assert_eq!(decoded, t);
    }
}
