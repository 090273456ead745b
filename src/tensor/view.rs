use std::ops::Range;

use crate::format::element::{Element, ElementType};
use crate::tensor::tensor::{element_count, Tensor};

/// A borrowed window into a [`Tensor`]: a byte offset plus its own shape.
///
/// A view never owns or copies memory. It is only constructed through
/// [`Tensor::view`], which guarantees the window is element-aligned and lies
/// inside the backing buffer, so every accessor here is infallible on bounds.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    tensor: &'a Tensor,
    byte_offset: usize,
    dims: &'a [usize],
}

impl<'a> TensorView<'a> {
    pub(crate) fn new(tensor: &'a Tensor, byte_offset: usize, dims: &'a [usize]) -> Self {
        TensorView { tensor, byte_offset, dims }
    }

    pub fn dims(&self) -> &'a [usize] {
        self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn element_type(&self) -> ElementType {
        self.tensor.element_type()
    }

    /// The tensor this view aliases.
    pub fn backing(&self) -> &'a Tensor {
        self.tensor
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn num_elements(&self) -> usize {
        // Bounded by the backing buffer, so this cannot overflow.
        element_count(self.dims).unwrap_or(0)
    }

    pub fn size_in_bytes(&self) -> usize {
        self.num_elements() * self.element_type().byte_width()
    }

    /// Byte range of the backing buffer covered by this view.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset + self.size_in_bytes()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        &self.tensor.as_bytes()[self.byte_range()]
    }

    /// Zero-copy typed access; `None` if `T` is not the element type.
    pub fn as_slice<T: Element>(&self) -> Option<&'a [T]> {
        let width = self.element_type().byte_width();
        let start = self.byte_offset / width;
        self.tensor
            .as_slice::<T>()
            .map(|all| &all[start..start + self.num_elements()])
    }

    /// Copies the elements out as `f64`, whatever the element type.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        fn widen<T: Element>(view: &TensorView<'_>) -> Vec<f64> {
            view.as_slice::<T>()
                .map(|s| s.iter().map(|&x| x.to_f64()).collect())
                .unwrap_or_default()
        }

        match self.element_type() {
            ElementType::UInt8 => widen::<u8>(self),
            ElementType::Int8 => widen::<i8>(self),
            ElementType::Int16 => widen::<i16>(self),
            ElementType::Int32 => widen::<i32>(self),
            ElementType::Float32 => widen::<f32>(self),
            ElementType::Float64 => widen::<f64>(self),
        }
    }

    /// Reads a single-element integer view, e.g. one class label.
    pub fn scalar_i64(&self) -> Option<i64> {
        if self.num_elements() != 1 {
            return None;
        }
        match self.element_type() {
            ElementType::UInt8 => self.as_slice::<u8>().map(|s| i64::from(s[0])),
            ElementType::Int8 => self.as_slice::<i8>().map(|s| i64::from(s[0])),
            ElementType::Int16 => self.as_slice::<i16>().map(|s| i64::from(s[0])),
            ElementType::Int32 => self.as_slice::<i32>().map(|s| i64::from(s[0])),
            ElementType::Float32 | ElementType::Float64 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tensor() -> Tensor {
        Tensor::from_vec(vec![3, 2], vec![10i16, 11, 20, 21, 30, 31]).unwrap()
    }

    #[test]
    fn view_aliases_backing_memory() {
        let t = sample_tensor();
        let dims = [2usize];
        let v = t.view(4, &dims).unwrap();
        assert_eq!(v.as_slice::<i16>().unwrap(), &[20, 21]);
        assert_eq!(v.byte_range(), 4..8);
        assert!(std::ptr::eq(v.as_bytes().as_ptr(), t.as_bytes()[4..].as_ptr()));
        assert!(std::ptr::eq(v.backing(), &t));
    }

    #[test]
    fn typed_access_requires_matching_type() {
        let t = sample_tensor();
        let dims = [2usize];
        let v = t.view(0, &dims).unwrap();
        assert!(v.as_slice::<u8>().is_none());
        assert_eq!(v.to_f64_vec(), vec![10.0, 11.0]);
    }

    #[test]
    fn scalar_views() {
        let t = Tensor::from_vec(vec![3], vec![7u8, 8, 9]).unwrap();
        let dims: [usize; 0] = [];
        let v = t.view(2, &dims).unwrap();
        assert_eq!(v.rank(), 0);
        assert_eq!(v.scalar_i64(), Some(9));

        let floats = Tensor::from_vec(vec![1], vec![1.0f32]).unwrap();
        assert_eq!(floats.view(0, &dims).unwrap().scalar_i64(), None);
    }
}
