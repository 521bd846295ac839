pub mod decomposition;
pub mod pinv;

pub use decomposition::*;
pub use pinv::*;
