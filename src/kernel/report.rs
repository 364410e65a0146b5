//! Failure kinds and the per-step failure collector.
//!
//! Validators never abort: every violated condition is pushed into a
//! [`FailureCollector`] owned by the step, so one pass surfaces every
//! violation a step contains. The collector is the source of truth for step
//! validity.

use core::fmt;

use crate::config::ConfigError;
use crate::field::FieldElement;

/// How a failure should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// A disprovable claim made by the invocation.
    Claim,
    /// Witness data is missing or malformed.
    Structural,
    /// Input sizing is broken; the step's accumulation is rejected.
    Fatal,
}

/// Reason a call is not allowed to run in the public kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKindViolation {
    Deployment,
    Constructor,
    Private,
}

impl fmt::Display for CallKindViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKindViolation::Deployment => write!(f, "deployment not allowed"),
            CallKindViolation::Constructor => write!(f, "constructor not allowed"),
            CallKindViolation::Private => write!(f, "private call not allowed in public kernel"),
        }
    }
}

/// Which declared effect a membership check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipContext {
    StateRead,
    StateTransition,
}

impl fmt::Display for MembershipContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipContext::StateRead => write!(f, "state_reads"),
            MembershipContext::StateTransition => write!(f, "state_transitions"),
        }
    }
}

/// Witness that was required but absent or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessKind {
    StateReadPath,
    StateTransitionPath,
    CallStackPreimage,
}

impl fmt::Display for WitnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessKind::StateReadPath => write!(f, "state_reads_sibling_paths"),
            WitnessKind::StateTransitionPath => write!(f, "state_transitions_sibling_paths"),
            WitnessKind::CallStackPreimage => write!(f, "public_call_stack_preimages"),
        }
    }
}

/// Accumulator array an append was rejected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputArray {
    PublicCallStack,
    StateTransitions,
}

impl fmt::Display for OutputArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputArray::PublicCallStack => write!(f, "end.public_call_stack"),
            OutputArray::StateTransitions => write!(f, "end.state_transitions"),
        }
    }
}

/// Fixed-capacity array whose declared bound is checked against the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedArray {
    StateReads,
    StateTransitions,
    PublicCallStack,
    ReturnValues,
    EndPublicCallStack,
    EndStateTransitions,
}

impl fmt::Display for BoundedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundedArray::StateReads => write!(f, "state_reads"),
            BoundedArray::StateTransitions => write!(f, "state_transitions"),
            BoundedArray::PublicCallStack => write!(f, "public_call_stack"),
            BoundedArray::ReturnValues => write!(f, "return_values"),
            BoundedArray::EndPublicCallStack => write!(f, "end.public_call_stack"),
            BoundedArray::EndStateTransitions => write!(f, "end.state_transitions"),
        }
    }
}

/// Every violation a kernel step can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelFailure {
    InvalidCallKind(CallKindViolation),
    InvalidAddress,
    InvalidSelector,
    InvalidBytecodeHash,
    MembershipMismatch {
        context: MembershipContext,
        index: usize,
        expected_root: FieldElement,
        computed_root: FieldElement,
    },
    CallStackMismatch {
        index: usize,
        declared: FieldElement,
        recomputed: FieldElement,
    },
    MissingWitness {
        kind: WitnessKind,
        index: usize,
    },
    CapacityExceeded {
        target: OutputArray,
        capacity: usize,
        required: usize,
    },
    /// An input array declares a capacity other than the configured limit.
    /// Fatal when it also holds more entries than the limit allows.
    ArrayBoundMismatch {
        array: BoundedArray,
        declared: usize,
        len: usize,
        limit: usize,
    },
    /// The limits the step was run under are themselves inconsistent.
    InvalidLimits(ConfigError),
    /// A continuation step found no pending call to execute.
    EmptyPendingCallStack,
    /// The popped pending call does not commit to the executed call.
    CallHashMismatch {
        expected: FieldElement,
        computed: FieldElement,
    },
}

impl KernelFailure {
    /// Stable kind name, independent of the contextual detail.
    pub fn kind_name(&self) -> &'static str {
        match self {
            KernelFailure::InvalidCallKind(_) => "InvalidCallKind",
            KernelFailure::InvalidAddress => "InvalidAddress",
            KernelFailure::InvalidSelector => "InvalidSelector",
            KernelFailure::InvalidBytecodeHash => "InvalidBytecodeHash",
            KernelFailure::MembershipMismatch { .. } => "MembershipMismatch",
            KernelFailure::CallStackMismatch { .. } => "CallStackMismatch",
            KernelFailure::MissingWitness { .. } => "MissingWitness",
            KernelFailure::CapacityExceeded { .. } => "CapacityExceeded",
            KernelFailure::ArrayBoundMismatch { .. } => "ArrayBoundMismatch",
            KernelFailure::InvalidLimits(_) => "InvalidLimits",
            KernelFailure::EmptyPendingCallStack => "EmptyPendingCallStack",
            KernelFailure::CallHashMismatch { .. } => "CallHashMismatch",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            KernelFailure::CapacityExceeded { .. } | KernelFailure::InvalidLimits(_) => {
                Severity::Fatal
            }
            KernelFailure::ArrayBoundMismatch { len, limit, .. } if len > limit => Severity::Fatal,
            KernelFailure::MissingWitness { .. }
            | KernelFailure::EmptyPendingCallStack
            | KernelFailure::ArrayBoundMismatch { .. } => Severity::Structural,
            _ => Severity::Claim,
        }
    }
}

impl fmt::Display for KernelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelFailure::InvalidCallKind(violation) => {
                write!(f, "invalid call kind: {}", violation)
            }
            KernelFailure::InvalidAddress => write!(f, "contract address must be valid"),
            KernelFailure::InvalidSelector => write!(f, "function selector must be valid"),
            KernelFailure::InvalidBytecodeHash => write!(f, "bytecode hash must be valid"),
            KernelFailure::MembershipMismatch {
                context,
                index,
                expected_root,
                computed_root,
            } => write!(
                f,
                "{}[{}]: membership root mismatch (expected {}, computed {})",
                context, index, expected_root, computed_root
            ),
            KernelFailure::CallStackMismatch {
                index,
                declared,
                recomputed,
            } => write!(
                f,
                "public_call_stack[{}] = {} does not reconcile with preimage hash {}",
                index, declared, recomputed
            ),
            KernelFailure::MissingWitness { kind, index } => {
                write!(f, "{}[{}]: witness missing or malformed", kind, index)
            }
            KernelFailure::CapacityExceeded {
                target,
                capacity,
                required,
            } => write!(
                f,
                "{} capacity exceeded: capacity {}, required {}",
                target, capacity, required
            ),
            KernelFailure::ArrayBoundMismatch {
                array,
                declared,
                len,
                limit,
            } => write!(
                f,
                "{} declares capacity {} with {} entries, limit is {}",
                array, declared, len, limit
            ),
            KernelFailure::InvalidLimits(err) => write!(f, "kernel limits rejected: {}", err),
            KernelFailure::EmptyPendingCallStack => {
                write!(f, "previous kernel has no pending public call")
            }
            KernelFailure::CallHashMismatch { expected, computed } => write!(
                f,
                "pending call hash {} does not match executed call hash {}",
                expected, computed
            ),
        }
    }
}

impl std::error::Error for KernelFailure {}

/// Call-scoped sink for kernel failures.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FailureCollector {
    failures: Vec<KernelFailure>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure and keeps going.
    pub fn report(&mut self, failure: KernelFailure) {
        tracing::warn!(
            kind = failure.kind_name(),
            severity = ?failure.severity(),
            "{}",
            failure
        );
        self.failures.push(failure);
    }

    /// Records the failure built by `failure` when `condition` does not hold.
    pub fn check<F>(&mut self, condition: bool, failure: F)
    where
        F: FnOnce() -> KernelFailure,
    {
        if !condition {
            self.report(failure());
        }
    }

    pub fn failures(&self) -> &[KernelFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if any recorded failure is [`Severity::Fatal`].
    pub fn has_fatal(&self) -> bool {
        self.failures
            .iter()
            .any(|failure| failure.severity() == Severity::Fatal)
    }

    /// Removes and returns all recorded failures.
    pub fn drain(&mut self) -> Vec<KernelFailure> {
        core::mem::take(&mut self.failures)
    }

    pub fn into_failures(self) -> Vec<KernelFailure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_only_records_violations() {
        let mut collector = FailureCollector::new();
        collector.check(true, || KernelFailure::InvalidAddress);
        collector.check(false, || KernelFailure::InvalidSelector);
        assert_eq!(collector.failures(), &[KernelFailure::InvalidSelector]);
    }

    #[test]
    fn drain_empties_the_collector() {
        let mut collector = FailureCollector::new();
        collector.report(KernelFailure::InvalidBytecodeHash);
        collector.report(KernelFailure::InvalidAddress);
        let drained = collector.drain();
        assert_eq!(drained.len(), 2);
        assert!(collector.is_empty());
    }

    #[test]
    fn capacity_failures_are_fatal() {
        let fatal = KernelFailure::CapacityExceeded {
            target: OutputArray::StateTransitions,
            capacity: 1,
            required: 2,
        };
        assert_eq!(fatal.severity(), Severity::Fatal);
        assert_eq!(
            KernelFailure::MissingWitness {
                kind: WitnessKind::CallStackPreimage,
                index: 0
            }
            .severity(),
            Severity::Structural
        );
        assert_eq!(
            KernelFailure::InvalidCallKind(CallKindViolation::Private).severity(),
            Severity::Claim
        );

        let mut collector = FailureCollector::new();
        collector.report(KernelFailure::InvalidAddress);
        assert!(!collector.has_fatal());
        collector.report(fatal);
        assert!(collector.has_fatal());
    }

    #[test]
    fn bound_mismatch_is_fatal_only_when_overfull() {
        let inflated = KernelFailure::ArrayBoundMismatch {
            array: BoundedArray::EndStateTransitions,
            declared: 10_000,
            len: 16,
            limit: 16,
        };
        assert_eq!(inflated.severity(), Severity::Structural);
        assert_eq!(
            inflated.to_string(),
            "end.state_transitions declares capacity 10000 with 16 entries, limit is 16"
        );

        let overfull = KernelFailure::ArrayBoundMismatch {
            array: BoundedArray::StateTransitions,
            declared: 10,
            len: 10,
            limit: 4,
        };
        assert_eq!(overfull.severity(), Severity::Fatal);
        assert_eq!(
            KernelFailure::InvalidLimits(ConfigError::ZeroCapacity {
                field: "state_reads"
            })
            .severity(),
            Severity::Fatal
        );
    }

    #[test]
    fn display_carries_context() {
        let failure = KernelFailure::MissingWitness {
            kind: WitnessKind::StateReadPath,
            index: 3,
        };
        assert_eq!(
            failure.to_string(),
            "state_reads_sibling_paths[3]: witness missing or malformed"
        );
        assert_eq!(
            KernelFailure::InvalidCallKind(CallKindViolation::Deployment).to_string(),
            "invalid call kind: deployment not allowed"
        );
    }
}
