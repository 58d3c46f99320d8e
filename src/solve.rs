pub mod brent;
pub mod objective;

pub use brent::{Brent, BrentResult};
pub use objective::{ObjFn, SingleDimFn};
