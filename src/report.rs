//! Generation observers.

use tracing::{debug, info};

use crate::{allele::Allele, population::Population};

/// A callback invoked once per generation with read-only snapshots of the
/// parent and child populations.
///
/// The optimizer makes no assumption about what an observer does with the
/// data and never waits on it for anything, so keep implementations cheap.
/// Implemented by any closure of type
/// `FnMut(&Population<A>, &Population<A>, usize)`.
pub trait GenerationObserver<A: Allele> {
  /// Called after the child population of generation `generation` has been
  /// evaluated.
  fn on_generation(
    &mut self,
    parent: &Population<A>,
    child: &Population<A>,
    generation: usize,
  );
}

impl<A, F> GenerationObserver<A> for F
where
  A: Allele,
  F: FnMut(&Population<A>, &Population<A>, usize),
{
  fn on_generation(
    &mut self,
    parent: &Population<A>,
    child: &Population<A>,
    generation: usize,
  ) {
    self(parent, child, generation)
  }
}

/// An observer that does nothing. The default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SilentObserver();

impl<A: Allele> GenerationObserver<A> for SilentObserver {
  fn on_generation(&mut self, _: &Population<A>, _: &Population<A>, _: usize) {
  }
}

/// An observer that logs a generation summary through [`tracing`]: sizes at
/// `info` level and each chromosome's objective values at `debug` level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TracingReporter();

impl<A: Allele> GenerationObserver<A> for TracingReporter {
  fn on_generation(
    &mut self,
    parent: &Population<A>,
    child: &Population<A>,
    generation: usize,
  ) {
    info!(
      generation,
      parent_size = parent.size(),
      child_size = child.size(),
      "generation complete"
    );
    for chromosome in child.iter() {
      debug!(
        generation,
        objective_values = ?chromosome.objective_values(),
        "child chromosome"
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{allele::BooleanAllele, chromosome::Chromosome};

  #[test]
  fn test_observer_from_closure() {
    let mut seen = Vec::new();
    {
      let mut observer = |parent: &Population<BooleanAllele>,
                          child: &Population<BooleanAllele>,
                          generation: usize| {
        seen.push((parent.size(), child.size(), generation));
      };
      let parent =
        Population::new(vec![Chromosome::new(vec![BooleanAllele(true)])]);
      let child = Population::new(vec![]);
      observer.on_generation(&parent, &child, 7);
    }
    assert_eq!(seen, vec![(1, 0, 7)]);
  }
}
