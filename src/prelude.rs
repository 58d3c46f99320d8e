//! rfcoil prelude.
//!
//! This module contains the most used types, traits and functions, which you
//! can import easily as a group.
//!
//! ```
//! use rfcoil::prelude::*;
//!
//! let model = CoilModel::new(CoilGeometryBuilder::new().diameter(100.0).length(100.0).wire_diameter(2.0).build());
//! assert_eq!(model.result().error_code, 0);
//! ```

#[doc(no_inline)]
pub use crate::coil::{
    CoilGeometry, CoilGeometryBuilder, CoilModel, CoilResult, CoilTables, Winding,
};

#[doc(no_inline)]
pub use crate::coil::circuit::{EffectiveCircuit, LumpedCircuit};
#[doc(no_inline)]
pub use crate::coil::correction::CorrectionFactors;
#[doc(no_inline)]
pub use crate::coil::dispersion::{DistributedSolution, HelixContext};
#[doc(no_inline)]
pub use crate::coil::proximity::ProximityTable;
#[doc(no_inline)]
pub use crate::coil::turns::{TurnsInverter, TurnsResult};

#[doc(no_inline)]
pub use crate::error::{CoilError, SolverError};

#[doc(no_inline)]
pub use crate::plating::{Plating, standard_platings};

#[doc(no_inline)]
pub use crate::report::{csv_column_header, csv_header, csv_line, summary};

#[doc(no_inline)]
pub use crate::scale::Scale;

#[doc(no_inline)]
pub use crate::solve::{Brent, BrentResult, ObjFn, SingleDimFn};

#[doc(no_inline)]
pub use crate::unit::{LengthUnit, parse_frequency_mhz, parse_length_mm};
