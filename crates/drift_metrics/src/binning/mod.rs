pub mod equal_width;

pub use equal_width::EqualWidthBinning;
