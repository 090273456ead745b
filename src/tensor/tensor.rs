use crate::error::FormatError;
use crate::format::element::{Element, ElementType};
use crate::tensor::view::TensorView;

/// Typed backing storage. Each variant owns a `Vec` of its native scalar,
/// so typed slices taken from it are always correctly aligned.
#[derive(Debug, Clone, PartialEq)]
enum Buffer {
    UInt8(Vec<u8>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Buffer {
    fn zeros(element_type: ElementType, len: usize) -> Buffer {
        match element_type {
            ElementType::UInt8 => Buffer::UInt8(vec![0; len]),
            ElementType::Int8 => Buffer::Int8(vec![0; len]),
            ElementType::Int16 => Buffer::Int16(vec![0; len]),
            ElementType::Int32 => Buffer::Int32(vec![0; len]),
            ElementType::Float32 => Buffer::Float32(vec![0.0; len]),
            ElementType::Float64 => Buffer::Float64(vec![0.0; len]),
        }
    }

    fn element_type(&self) -> ElementType {
        match self {
            Buffer::UInt8(_) => ElementType::UInt8,
            Buffer::Int8(_) => ElementType::Int8,
            Buffer::Int16(_) => ElementType::Int16,
            Buffer::Int32(_) => ElementType::Int32,
            Buffer::Float32(_) => ElementType::Float32,
            Buffer::Float64(_) => ElementType::Float64,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Buffer::UInt8(v) => v.as_slice(),
            Buffer::Int8(v) => bytemuck::cast_slice(v),
            Buffer::Int16(v) => bytemuck::cast_slice(v),
            Buffer::Int32(v) => bytemuck::cast_slice(v),
            Buffer::Float32(v) => bytemuck::cast_slice(v),
            Buffer::Float64(v) => bytemuck::cast_slice(v),
        }
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Buffer::UInt8(v) => v.as_mut_slice(),
            Buffer::Int8(v) => bytemuck::cast_slice_mut(v),
            Buffer::Int16(v) => bytemuck::cast_slice_mut(v),
            Buffer::Int32(v) => bytemuck::cast_slice_mut(v),
            Buffer::Float32(v) => bytemuck::cast_slice_mut(v),
            Buffer::Float64(v) => bytemuck::cast_slice_mut(v),
        }
    }
}

/// An owned, contiguous, row-major block of elements tagged with its shape.
///
/// Payload bytes are kept in native order exactly as they were read; only
/// the SN3 header is big-endian.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    dims: Vec<usize>,
    buffer: Buffer,
}

/// Product of `dims`, or `None` on overflow. An empty shape holds one element.
pub fn element_count(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

impl Tensor {
    /// Allocates a zero-filled tensor whose buffer is exactly
    /// `byte_width * product(dims)` bytes.
    pub fn zeros(dims: Vec<usize>, element_type: ElementType) -> Result<Tensor, FormatError> {
        let len = element_count(&dims)
            .filter(|n| n.checked_mul(element_type.byte_width()).is_some())
            .ok_or_else(|| FormatError::PayloadOverflow { dims: dims.clone() })?;
        Ok(Tensor { buffer: Buffer::zeros(element_type, len), dims })
    }

    /// Builds a tensor from typed data. Returns `None` when `data.len()` does
    /// not match the product of `dims`.
    pub fn from_vec<T: Element>(dims: Vec<usize>, data: Vec<T>) -> Option<Tensor> {
        if element_count(&dims)? != data.len() {
            return None;
        }
        let mut tensor = Tensor::zeros(dims, T::ELEMENT_TYPE).ok()?;
        tensor.as_bytes_mut().copy_from_slice(bytemuck::cast_slice(&data));
        Some(tensor)
    }

    /// Takes ownership of already converted float32 data without copying it.
    /// Returns `None` when `data.len()` does not match the product of `dims`.
    pub(crate) fn from_f32_vec(dims: Vec<usize>, data: Vec<f32>) -> Option<Tensor> {
        if element_count(&dims)? != data.len() {
            return None;
        }
        Some(Tensor { dims, buffer: Buffer::Float32(data) })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn element_type(&self) -> ElementType {
        self.buffer.element_type()
    }

    pub fn num_elements(&self) -> usize {
        self.size_in_bytes() / self.element_type().byte_width()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.as_bytes_mut()
    }

    /// Typed view of the whole buffer; `None` if `T` is not the element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        if T::ELEMENT_TYPE != self.element_type() {
            return None;
        }
        bytemuck::try_cast_slice(self.as_bytes()).ok()
    }

    /// Creates a view sharing this tensor's memory, starting `byte_offset`
    /// bytes in and shaped by `dims`.
    ///
    /// Returns `None` if the offset is not element-aligned or the view would
    /// extend past the end of the buffer.
    pub fn view<'a>(&'a self, byte_offset: usize, dims: &'a [usize]) -> Option<TensorView<'a>> {
        let width = self.element_type().byte_width();
        let len = element_count(dims)?.checked_mul(width)?;
        let end = byte_offset.checked_add(len)?;
        if byte_offset % width != 0 || end > self.size_in_bytes() {
            return None;
        }
        Some(TensorView::new(self, byte_offset, dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_exact_size() {
        let t = Tensor::zeros(vec![3, 2, 5], ElementType::Int16).unwrap();
        assert_eq!(t.size_in_bytes(), 2 * 3 * 2 * 5);
        assert_eq!(t.num_elements(), 30);
        assert_eq!(t.dims(), &[3, 2, 5]);
        assert_eq!(t.element_type(), ElementType::Int16);
    }

    #[test]
    fn zeros_rejects_overflowing_shape() {
        let err = Tensor::zeros(vec![usize::MAX, 2], ElementType::UInt8).unwrap_err();
        assert!(matches!(err, FormatError::PayloadOverflow { .. }));
        assert!(Tensor::zeros(vec![usize::MAX / 2], ElementType::Float64).is_err());
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Tensor::from_vec(vec![2, 2], vec![1u8, 2, 3]).is_none());
        let t = Tensor::from_vec(vec![2, 2], vec![1.5f32, 2.0, -1.0, 0.25]).unwrap();
        assert_eq!(t.as_slice::<f32>().unwrap(), &[1.5, 2.0, -1.0, 0.25]);
        assert!(t.as_slice::<f64>().is_none());
    }

    #[test]
    fn from_f32_vec_keeps_the_allocation() {
        assert!(Tensor::from_f32_vec(vec![3], vec![0.0; 2]).is_none());

        let data = vec![0.0f32, 0.5, 1.0, 0.25];
        let ptr = data.as_ptr() as *const u8;
        let t = Tensor::from_f32_vec(vec![2, 2], data).unwrap();
        assert_eq!(t.as_bytes().as_ptr(), ptr);
        assert_eq!(t.as_slice::<f32>().unwrap(), &[0.0, 0.5, 1.0, 0.25]);
    }

    #[test]
    fn bytes_are_native_order() {
        let t = Tensor::from_vec(vec![2], vec![0x0102i16, 0x0304]).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&0x0102i16.to_ne_bytes());
        expected.extend_from_slice(&0x0304i16.to_ne_bytes());
        assert_eq!(t.as_bytes(), expected.as_slice());
    }

    #[test]
    fn view_bounds() {
        let t = Tensor::from_vec(vec![4, 2], vec![0i32; 8]).unwrap();
        let dims = [2usize];
        assert!(t.view(0, &dims).is_some());
        assert!(t.view(24, &dims).is_some());
        assert!(t.view(28, &dims).is_none());
        assert!(t.view(2, &dims).is_none());
    }

    #[test]
    fn empty_shape_is_a_scalar() {
        assert_eq!(element_count(&[]), Some(1));
        assert_eq!(element_count(&[4, 0, 3]), Some(0));
    }
}
