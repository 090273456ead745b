pub mod tensor;
pub mod view;

pub use tensor::{element_count, Tensor};
pub use view::TensorView;
