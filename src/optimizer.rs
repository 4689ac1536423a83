//! Abstract optimizer.

pub mod nsga2;

use crate::{allele::Allele, error::Error, population::Population};

/// Represents an abstract multi-objective optimizer.
pub trait Optimizer<A: Allele> {
  /// Runs the optimizer for its configured number of generations, then
  /// returns the last surviving population - the Pareto front approximation.
  fn optimize(self) -> Result<Population<A>, Error>;
}
