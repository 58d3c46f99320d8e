pub mod coil;
pub mod consts;
pub mod error;
pub mod plating;
pub mod prelude;
pub mod report;
pub mod scale;
pub mod solve;
pub mod special;
pub mod unit;
