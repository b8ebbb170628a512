pub mod validate;
pub mod vehicle_ops;

pub use validate::*;
pub use vehicle_ops::*;
