use std::fmt;

/// Error types for the one-dimensional root finder
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    FunctionEvaluationError,
    InvalidBracket,
    InvalidTolerance,
    MaxIterationsExceeded,
    SameSignError,
}

impl SolverError {
    /// Numeric code of the root-finder failure
    pub fn code(&self) -> u8 {
        match self {
            SolverError::InvalidBracket => 1,
            SolverError::InvalidTolerance => 2,
            SolverError::SameSignError => 3,
            SolverError::FunctionEvaluationError => 4,
            SolverError::MaxIterationsExceeded => 5,
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::FunctionEvaluationError => {
                write!(f, "Function evaluation returned invalid value")
            }
            SolverError::InvalidBracket => {
                write!(f, "Invalid bracket: endpoints must be finite and distinct")
            }
            SolverError::InvalidTolerance => write!(f, "Tolerance must be positive"),
            SolverError::MaxIterationsExceeded => write!(f, "Maximum iterations exceeded"),
            SolverError::SameSignError => {
                write!(
                    f,
                    "Function values at bracket endpoints must have opposite signs"
                )
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Failures of the coil model.
///
/// Each variant maps onto a stable numeric code (see [`CoilError::code`]) which is
/// carried in result records and CSV output; 0 is reserved for success.
#[derive(Clone, Debug, PartialEq)]
pub enum CoilError {
    /// No root of the sheath-helix dispersion relation at the design frequency
    DispersionUnsolvable(SolverError),
    /// The effective impedance cannot be reproduced by an R-L series branch with a
    /// parallel capacitance
    NoLumpedEquivalent,
    /// The dispersion relation failed during the self-resonance search
    ResonanceUnsolvable(SolverError),
    /// Geometry or material parameters outside the model's domain
    InvalidGeometry(String),
    /// The turns inversion could not bracket the target inductance
    BracketFailure(SolverError),
    /// The turns found for the target inductance resonate below the design frequency
    ResonanceBelowDesignFrequency,
    /// Length too short for even the minimum number of turns
    InsufficientLength,
    /// Inductance at the starting turns count is negative
    OutOfAlgorithmRange,
}

impl CoilError {
    /// Numeric error code as reported in result records
    pub fn code(&self) -> u8 {
        match self {
            CoilError::DispersionUnsolvable(_) => 1,
            CoilError::NoLumpedEquivalent => 2,
            CoilError::ResonanceUnsolvable(_) => 3,
            CoilError::InvalidGeometry(_) => 4,
            CoilError::BracketFailure(_) => 5,
            CoilError::ResonanceBelowDesignFrequency => 6,
            CoilError::InsufficientLength => 7,
            CoilError::OutOfAlgorithmRange => 8,
        }
    }
}

impl fmt::Display for CoilError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoilError::DispersionUnsolvable(e) => {
                write!(f, "Dispersion relation has no solution: {}", e)
            }
            CoilError::NoLumpedEquivalent => {
                write!(f, "No lumped R-L-C equivalent for the effective impedance")
            }
            CoilError::ResonanceUnsolvable(e) => {
                write!(f, "Self-resonance search failed: {}", e)
            }
            CoilError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            CoilError::BracketFailure(e) => {
                write!(f, "Target inductance could not be bracketed: {}", e)
            }
            CoilError::ResonanceBelowDesignFrequency => {
                write!(f, "Self-resonant frequency is below the design frequency")
            }
            CoilError::InsufficientLength => {
                write!(f, "Coil too short for the minimum number of turns")
            }
            CoilError::OutOfAlgorithmRange => {
                write!(f, "Inductance negative at the starting number of turns")
            }
        }
    }
}

impl std::error::Error for CoilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoilError::DispersionUnsolvable(e)
            | CoilError::ResonanceUnsolvable(e)
            | CoilError::BracketFailure(e) => Some(e),
            _ => None,
        }
    }
}
