pub mod value;
pub mod encoder;

pub use value::*;
pub use encoder::*;
