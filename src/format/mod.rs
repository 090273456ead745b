pub mod element;
pub mod reader;
pub mod decoder;
pub mod encoder;

pub use element::{byte_width, element_type, Element, ElementType};
pub use reader::ByteReader;
pub use decoder::{
    decode_bytes, read_sn3_file, read_sn3_header, Sn3File, Sn3Header, MAX_HEADER_LEN,
};
pub use encoder::{encode_tensor, encode_to_vec, write_sn3_file};
