//! Capacity configuration for kernel inputs and outputs.
//!
//! The constants below are the canonical array sizes of the public kernel
//! ABI. [`KernelLimits`] carries the same values at runtime so that
//! integrators can load a profile from JSON, validate it once and thread it
//! through fixture construction and accumulator initialisation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Height of the public data tree; sibling paths carry exactly this many nodes.
pub const PUBLIC_DATA_TREE_HEIGHT: usize = 64;

/// State reads a single public call may declare.
pub const STATE_READS_LENGTH: usize = 4;

/// State transitions a single public call may declare.
pub const STATE_TRANSITIONS_LENGTH: usize = 4;

/// Nested public calls a single public call may enqueue.
pub const PUBLIC_CALL_STACK_LENGTH: usize = 4;

/// Return values a single public call may expose.
pub const RETURN_VALUES_LENGTH: usize = 4;

/// Pending public calls the accumulator can hold.
pub const KERNEL_PUBLIC_CALL_STACK_LENGTH: usize = 8;

/// Public data writes the accumulator can hold.
pub const KERNEL_STATE_TRANSITIONS_LENGTH: usize = 16;

/// Runtime capacity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelLimits {
    pub state_reads: usize,
    pub state_transitions: usize,
    pub public_call_stack: usize,
    pub return_values: usize,
    pub kernel_public_call_stack: usize,
    pub kernel_state_transitions: usize,
}

impl Default for KernelLimits {
    fn default() -> Self {
        Self {
            state_reads: STATE_READS_LENGTH,
            state_transitions: STATE_TRANSITIONS_LENGTH,
            public_call_stack: PUBLIC_CALL_STACK_LENGTH,
            return_values: RETURN_VALUES_LENGTH,
            kernel_public_call_stack: KERNEL_PUBLIC_CALL_STACK_LENGTH,
            kernel_state_transitions: KERNEL_STATE_TRANSITIONS_LENGTH,
        }
    }
}

impl KernelLimits {
    /// Parses a profile from JSON; missing fields fall back to the defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let limits: KernelLimits =
            serde_json::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Checks the cross-field invariants of the profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("state_reads", self.state_reads),
            ("state_transitions", self.state_transitions),
            ("public_call_stack", self.public_call_stack),
            ("return_values", self.return_values),
            ("kernel_public_call_stack", self.kernel_public_call_stack),
            ("kernel_state_transitions", self.kernel_state_transitions),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field });
            }
        }
        if self.kernel_public_call_stack < self.public_call_stack {
            return Err(ConfigError::AccumulatorTooSmall {
                field: "kernel_public_call_stack",
                accumulator: self.kernel_public_call_stack,
                per_call: self.public_call_stack,
            });
        }
        if self.kernel_state_transitions < self.state_transitions {
            return Err(ConfigError::AccumulatorTooSmall {
                field: "kernel_state_transitions",
                accumulator: self.kernel_state_transitions,
                per_call: self.state_transitions,
            });
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a [`KernelLimits`] profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON input could not be decoded.
    Parse(String),
    /// A capacity was configured as zero.
    ZeroCapacity { field: &'static str },
    /// An accumulator capacity cannot hold a single call's contribution.
    AccumulatorTooSmall {
        field: &'static str,
        accumulator: usize,
        per_call: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(reason) => write!(f, "invalid kernel limits: {}", reason),
            ConfigError::ZeroCapacity { field } => {
                write!(f, "kernel limit `{}` must be non-zero", field)
            }
            ConfigError::AccumulatorTooSmall {
                field,
                accumulator,
                per_call,
            } => write!(
                f,
                "kernel limit `{}` ({}) is smaller than the per-call capacity ({})",
                field, accumulator, per_call
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
