use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FormatError, Sn3Error};
use crate::format::element::{self, ElementType};
use crate::format::reader::ByteReader;
use crate::tensor::{element_count, Tensor};

/// Longest possible header: 4 magic bytes plus 255 big-endian dims.
pub const MAX_HEADER_LEN: usize = 4 + 4 * u8::MAX as usize;

/// Parsed SN3 header.
///
/// # Layout
/// ```text
/// byte  0:      reserved (ignored)
/// byte  1:      reserved (ignored)
/// byte  2:      type code  8=u8 9=i8 11=i16 12=i32 13=f32 14=f64
/// byte  3:      num_dims
/// bytes 4..:    num_dims big-endian u32 dimension sizes; dims[0] = sample count
/// then:         byte_width(type) * product(dims) payload bytes, row-major
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sn3Header {
    pub element_type: ElementType,
    pub dims: Vec<usize>,
}

impl Sn3Header {
    /// Reads the magic bytes and the dimension list, leaving `reader`
    /// positioned at the start of the payload.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Sn3Header, FormatError> {
        let magic = reader.read_array::<4>()?;
        if magic[0] != 0 || magic[1] != 0 {
            warn!(reserved = ?&magic[..2], "non-zero reserved bytes in SN3 header");
        }
        let type_code = magic[2];
        let num_dims = magic[3] as usize;

        let dims = (0..num_dims)
            .map(|_| reader.read_u32_be().map(|d| d as usize))
            .collect::<Result<Vec<_>, _>>()?;

        let element_type = element::element_type(type_code)?;
        debug!(type_code, %element_type, ?dims, "parsed SN3 header");

        Ok(Sn3Header { element_type, dims })
    }

    /// Number of header bytes: 4 magic bytes plus 4 per dimension.
    pub fn header_len(&self) -> usize {
        4 + 4 * self.dims.len()
    }

    /// Exact payload size in bytes.
    pub fn payload_len(&self) -> Result<usize, FormatError> {
        element_count(&self.dims)
            .and_then(|n| n.checked_mul(self.element_type.byte_width()))
            .ok_or_else(|| FormatError::PayloadOverflow { dims: self.dims.clone() })
    }
}

/// Decodes a complete SN3 blob into a tensor.
///
/// Payload bytes are copied verbatim; no byte swapping is applied to them.
/// Bytes after the declared payload are ignored.
pub fn decode_bytes(bytes: &[u8]) -> Result<Tensor, FormatError> {
    let mut reader = ByteReader::new(bytes);
    let header = Sn3Header::parse(&mut reader)?;
    let payload_len = header.payload_len()?;

    // Check before allocating so a lying header cannot trigger a huge allocation.
    if payload_len > reader.remaining() {
        return Err(FormatError::Truncated {
            offset: reader.offset(),
            needed: payload_len,
            available: reader.remaining(),
        });
    }

    let mut tensor = Tensor::zeros(header.dims, header.element_type)?;
    reader.read_into(tensor.as_bytes_mut())?;

    if reader.remaining() > 0 {
        debug!(trailing = reader.remaining(), "ignoring bytes after SN3 payload");
    }
    Ok(tensor)
}

/// A decoded SN3 file: the tensor plus the path it came from.
#[derive(Debug, Clone)]
pub struct Sn3File {
    pub path: PathBuf,
    pub tensor: Tensor,
}

impl Sn3File {
    pub fn element_type(&self) -> ElementType {
        self.tensor.element_type()
    }

    pub fn dims(&self) -> &[usize] {
        self.tensor.dims()
    }

    /// Leading dimension, if the file has one.
    pub fn sample_count(&self) -> Option<usize> {
        self.dims().first().copied()
    }
}

fn io_error(path: &Path) -> impl Fn(std::io::Error) -> Sn3Error + '_ {
    move |source| Sn3Error::Io { path: path.to_path_buf(), source }
}

fn open_file(path: &Path) -> Result<File, Sn3Error> {
    if !path.exists() {
        return Err(Sn3Error::FileNotFound { path: path.to_path_buf() });
    }
    File::open(path).map_err(io_error(path))
}

fn read_file_bytes(path: &Path) -> Result<Vec<u8>, Sn3Error> {
    let mut bytes = Vec::new();
    open_file(path)?.read_to_end(&mut bytes).map_err(io_error(path))?;
    Ok(bytes)
}

/// Reads and decodes the SN3 file at `path` in one blocking pass.
pub fn read_sn3_file(path: impl AsRef<Path>) -> Result<Sn3File, Sn3Error> {
    let path = path.as_ref();
    let bytes = read_file_bytes(path)?;
    let tensor = decode_bytes(&bytes).map_err(|e| Sn3Error::format(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "decoded SN3 file");
    Ok(Sn3File { path: path.to_path_buf(), tensor })
}

/// Reads only the header of the SN3 file at `path`.
///
/// At most [`MAX_HEADER_LEN`] bytes are read, so the payload is neither
/// loaded nor checked for truncation.
pub fn read_sn3_header(path: impl AsRef<Path>) -> Result<Sn3Header, Sn3Error> {
    let path = path.as_ref();
    let mut prefix = Vec::with_capacity(MAX_HEADER_LEN);
    open_file(path)?
        .take(MAX_HEADER_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(io_error(path))?;
    Sn3Header::parse(&mut ByteReader::new(&prefix)).map_err(|e| Sn3Error::format(path, e))
}
