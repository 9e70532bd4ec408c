//! Error types for the cubewalk core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while fitting a line through `(steps, ln(frequency))`
/// points.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SlopeError {
    /// Fewer than two points were supplied.
    #[error("a slope needs at least 2 points (got {points})")]
    InsufficientData {
        /// Number of points supplied by the caller.
        points: usize,
    },
    /// Every point shares the same `x`, so the fit has no unique slope.
    #[error("all {points} points share the same x value; the slope is undefined")]
    DegenerateFit {
        /// Number of points supplied by the caller.
        points: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite {
        /// Position of the offending point in the input slice.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SlopeError`] variants.
    enum SlopeErrorCode for SlopeError {
        /// Fewer than two points were supplied.
        InsufficientData => InsufficientData { .. } => "SLOPE_INSUFFICIENT_DATA",
        /// Every point shares the same `x`.
        DegenerateFit => DegenerateFit { .. } => "SLOPE_DEGENERATE_FIT",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "SLOPE_NON_FINITE",
    }
}

/// Error type produced when configuring or running a [`crate::Simulation`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// The trial count must be at least one.
    #[error("trials must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// The run was cancelled before every walk finished.
    #[error("simulation cancelled after {completed} of {trials} walks")]
    Cancelled {
        /// Walks that completed before cancellation was observed.
        completed: usize,
        /// Walks the run was configured to perform.
        trials: usize,
    },
    /// The log-frequency fit could not produce a slope.
    #[error("failed to fit the log-frequency slope: {source}")]
    Fit {
        #[source]
        /// Underlying regression failure.
        source: SlopeError,
    },
    /// The worker thread could not be started.
    #[error("failed to spawn simulation worker: {reason}")]
    SpawnFailed {
        /// Operating system error text reported by the spawn attempt.
        reason: Arc<str>,
    },
    /// The worker thread panicked before delivering a result.
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

define_error_codes! {
    /// Stable codes describing [`SimulationError`] variants.
    enum SimulationErrorCode for SimulationError {
        /// The trial count must be at least one.
        InvalidTrialCount => InvalidTrialCount { .. } => "SIMULATION_INVALID_TRIAL_COUNT",
        /// The run was cancelled before every walk finished.
        Cancelled => Cancelled { .. } => "SIMULATION_CANCELLED",
        /// The log-frequency fit could not produce a slope.
        FitFailure => Fit { .. } => "SIMULATION_FIT_FAILURE",
        /// The worker thread could not be started.
        SpawnFailed => SpawnFailed { .. } => "SIMULATION_SPAWN_FAILED",
        /// The worker thread panicked before delivering a result.
        WorkerPanicked => WorkerPanicked => "SIMULATION_WORKER_PANICKED",
    }
}

impl SimulationError {
    /// Retrieve the inner [`SlopeErrorCode`] when the error came from the fit.
    #[must_use]
    pub const fn fit_code(&self) -> Option<SlopeErrorCode> {
        match self {
            Self::Fit { source } => Some(source.code()),
            _ => None,
        }
    }

    /// Returns `true` when re-running with more trials may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Fit {
                source: SlopeError::InsufficientData { .. } | SlopeError::DegenerateFit { .. },
            }
        )
    }
}

impl From<SlopeError> for SimulationError {
    fn from(source: SlopeError) -> Self {
        Self::Fit { source }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SimulationError>;
