//! Crate error type.

/// An error raised by the optimizer or one of its pluggable operators.
///
/// The evolution loop performs no partial-failure recovery: any error
/// returned by an operator or objective function aborts the current run and
/// propagates unmodified to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// An operator or fitness calculator specialized to one genotype
  /// representation was handed an incompatible one.
  #[error(
    "`{operator}` only works with bit encoded alleles. \
     Supply your own implementation suited to your allele type instead"
  )]
  RepresentationMismatch {
    /// Name of the rejecting operator.
    operator: &'static str,
  },

  /// An operation that requires at least one individual was invoked on an
  /// empty population.
  #[error("cannot {operation} an empty population")]
  EmptyPopulation {
    /// The operation that was attempted.
    operation: &'static str,
  },

  /// Individuals of one population carry objective vectors of different
  /// lengths, so dominance between them is undefined.
  #[error(
    "chromosome carries {found} objective values where {expected} \
     were expected"
  )]
  ObjectiveCountMismatch {
    /// Objective vector length of the first individual.
    expected: usize,
    /// Conflicting length found on another individual.
    found: usize,
  },
}
