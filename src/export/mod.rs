pub mod png;

pub use png::{save_grayscale_png, to_luma8};
