//! An ordered collection of chromosomes.

use itertools::{Itertools, MinMaxResult};

use crate::{allele::Allele, chromosome::Chromosome};

/// An ordered collection of [`Chromosome`]s.
///
/// A population exclusively owns its members: crossover and mutation always
/// produce fresh chromosomes, so no individual is ever shared by reference
/// between two populations that may be mutated independently. Outside of the
/// transient merged parent+child state, a population's size is a run-wide
/// constant.
#[derive(Clone, Debug)]
pub struct Population<A: Allele> {
  populace: Vec<Chromosome<A>>,
}

impl<A: Allele> Population<A> {
  /// Creates a population from its members.
  pub fn new(populace: Vec<Chromosome<A>>) -> Self {
    Self { populace }
  }

  /// Number of individuals in the population.
  pub fn size(&self) -> usize {
    self.populace.len()
  }

  /// Returns `true` if the population has no members.
  pub fn is_empty(&self) -> bool {
    self.populace.is_empty()
  }

  /// The individual at `index`.
  pub fn get(&self, index: usize) -> &Chromosome<A> {
    &self.populace[index]
  }

  /// Iterates over the members in order.
  pub fn iter(&self) -> impl Iterator<Item = &Chromosome<A>> {
    self.populace.iter()
  }

  /// Iterates mutably over the members in order.
  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chromosome<A>> {
    self.populace.iter_mut()
  }

  /// Members as a mutable slice.
  pub(crate) fn as_mut_slice(&mut self) -> &mut [Chromosome<A>] {
    &mut self.populace
  }

  /// Appends all members of `other`, leaving it empty. Used to merge the
  /// parent and child populations before re-ranking.
  pub fn append(&mut self, other: &mut Population<A>) {
    self.populace.append(&mut other.populace);
  }

  /// Consumes the population, yielding its members.
  pub fn into_populace(self) -> Vec<Chromosome<A>> {
    self.populace
  }

  /// The smallest normalized value of objective `objective_index` across the
  /// population, or `None` for an empty population.
  pub fn minimum_normalized_objective_value(
    &self,
    objective_index: usize,
  ) -> Option<f64> {
    self.normalized_objective_minmax(objective_index).map(|m| m.0)
  }

  /// The largest normalized value of objective `objective_index` across the
  /// population, or `None` for an empty population.
  pub fn maximum_normalized_objective_value(
    &self,
    objective_index: usize,
  ) -> Option<f64> {
    self.normalized_objective_minmax(objective_index).map(|m| m.1)
  }

  fn normalized_objective_minmax(
    &self,
    objective_index: usize,
  ) -> Option<(f64, f64)> {
    let minmax = self
      .populace
      .iter()
      .map(|c| c.normalized_objective_values()[objective_index])
      .minmax_by(|a, b| a.total_cmp(b));
    match minmax {
      MinMaxResult::NoElements => None,
      MinMaxResult::OneElement(v) => Some((v, v)),
      MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
  }
}
