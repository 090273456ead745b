use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Element types an SN3 file can declare in header byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    #[serde(rename = "uint8")]
    UInt8,
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

/// Type code, element type, byte width. Codes 10 and anything above 14 are
/// not part of the format.
const TYPE_TABLE: [(u8, ElementType, usize); 6] = [
    (0x08, ElementType::UInt8, 1),
    (0x09, ElementType::Int8, 1),
    (0x0B, ElementType::Int16, 2),
    (0x0C, ElementType::Int32, 4),
    (0x0D, ElementType::Float32, 4),
    (0x0E, ElementType::Float64, 8),
];

fn lookup(code: u8) -> Result<&'static (u8, ElementType, usize), FormatError> {
    TYPE_TABLE
        .iter()
        .find(|(c, _, _)| *c == code)
        .ok_or(FormatError::UnsupportedTypeCode(code))
}

/// Byte width of one element for a header type code.
pub fn byte_width(code: u8) -> Result<usize, FormatError> {
    lookup(code).map(|&(_, _, width)| width)
}

/// Element type for a header type code.
pub fn element_type(code: u8) -> Result<ElementType, FormatError> {
    lookup(code).map(|&(_, ty, _)| ty)
}

impl ElementType {
    /// Header type code written for this element type.
    pub fn code(self) -> u8 {
        match self {
            ElementType::UInt8 => 0x08,
            ElementType::Int8 => 0x09,
            ElementType::Int16 => 0x0B,
            ElementType::Int32 => 0x0C,
            ElementType::Float32 => 0x0D,
            ElementType::Float64 => 0x0E,
        }
    }

    pub fn byte_width(self) -> usize {
        match self {
            ElementType::UInt8 | ElementType::Int8 => 1,
            ElementType::Int16 => 2,
            ElementType::Int32 | ElementType::Float32 => 4,
            ElementType::Float64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::UInt8 => "uint8",
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

/// Rust scalar types that can back a tensor buffer.
///
/// `Pod` lets a typed buffer be viewed as raw bytes (and back) without
/// copying, which is how payloads are read and views are sliced.
pub trait Element: bytemuck::Pod {
    const ELEMENT_TYPE: ElementType;

    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element! {
    u8 => UInt8,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_codes_resolve() {
        let expected = [
            (8, ElementType::UInt8, 1),
            (9, ElementType::Int8, 1),
            (11, ElementType::Int16, 2),
            (12, ElementType::Int32, 4),
            (13, ElementType::Float32, 4),
            (14, ElementType::Float64, 8),
        ];
        for (code, ty, width) in expected {
            assert_eq!(element_type(code).unwrap(), ty);
            assert_eq!(byte_width(code).unwrap(), width);
            assert_eq!(ty.code(), code);
            assert_eq!(ty.byte_width(), width);
        }
    }

    #[test]
    fn every_other_code_is_rejected() {
        for code in (0..=u8::MAX).filter(|c| ![8, 9, 11, 12, 13, 14].contains(c)) {
            let rejected = |r: Result<_, FormatError>| {
                matches!(r, Err(FormatError::UnsupportedTypeCode(c)) if c == code)
            };
            assert!(rejected(element_type(code).map(|_| ())));
            assert!(rejected(byte_width(code).map(|_| ())));
        }
    }

    #[test]
    fn element_trait_matches_registry() {
        assert_eq!(<u8 as Element>::ELEMENT_TYPE, ElementType::UInt8);
        assert_eq!(<f32 as Element>::ELEMENT_TYPE, ElementType::Float32);
        assert_eq!(std::mem::size_of::<i16>(), ElementType::Int16.byte_width());
        assert_eq!(std::mem::size_of::<f64>(), ElementType::Float64.byte_width());
        assert_eq!((-3i8).to_f64(), -3.0);
    }
}
