pub mod regression;
pub mod method;
pub mod least_squares;
pub mod gradient_descent;

pub use regression::*;
pub use method::*;
pub use least_squares::*;
pub use gradient_descent::*;
