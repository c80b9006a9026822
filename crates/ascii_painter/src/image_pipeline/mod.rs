pub mod adjust;
pub mod resize;
