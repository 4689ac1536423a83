//! The individual of a population: an allele sequence plus cached objective
//! values.

use crate::allele::Allele;

/// Number of decimal places objective values are rounded to when written.
const OBJECTIVE_PRECISION: i32 = 4;

/// Rounds `value` to `precision` decimal places, half away from zero.
pub fn round_off(value: f64, precision: i32) -> f64 {
  let scale = 10f64.powi(precision);
  (value * scale).round() / scale
}

/// A single candidate solution.
///
/// A chromosome owns its genetic code exclusively and caches the values
/// derived from it during a generation: raw objective values, their
/// population normalized counterparts and an optional scalar fitness.
/// Raw objective values are rounded to 4 decimal places when written, so
/// floating point noise beyond that precision cannot destabilize dominance
/// comparisons.
///
/// Non-domination rank, crowding distance and the domination bookkeeping are
/// deliberately *not* part of this struct: they are recomputed from scratch
/// every ranking pass and live in [`Ranking`](crate::ranking::Ranking)
/// instead.
#[derive(Clone, Debug)]
pub struct Chromosome<A: Allele> {
  genetic_code: Vec<A>,
  objective_values: Vec<f64>,
  normalized_objective_values: Vec<f64>,
  fitness: Option<f64>,
}

impl<A: Allele> Chromosome<A> {
  /// Creates a chromosome from its genetic code. All cached values start
  /// unset.
  pub fn new(genetic_code: Vec<A>) -> Self {
    Self {
      genetic_code,
      objective_values: Vec::new(),
      normalized_objective_values: Vec::new(),
      fitness: None,
    }
  }

  /// The allele sequence of this chromosome.
  pub fn genetic_code(&self) -> &[A] {
    &self.genetic_code
  }

  /// Number of alleles in the genetic code.
  pub fn len(&self) -> usize {
    self.genetic_code.len()
  }

  /// Returns `true` if the genetic code is empty.
  pub fn is_empty(&self) -> bool {
    self.genetic_code.is_empty()
  }

  /// Raw objective values, one per configured objective, in objective order.
  pub fn objective_values(&self) -> &[f64] {
    &self.objective_values
  }

  /// Writes the objective value at `index`, rounding it to 4 decimal places.
  /// Overwrites any prior value at the same index.
  pub fn set_objective_value(&mut self, index: usize, value: f64) {
    let rounded = round_off(value, OBJECTIVE_PRECISION);
    if self.objective_values.len() <= index {
      self.objective_values.resize(index, 0.0);
      self.objective_values.push(rounded);
    } else {
      self.objective_values[index] = rounded;
    }
  }

  /// Objective values rescaled across the current population. Meaningful
  /// only after a ranking pass and never carried across generations.
  pub fn normalized_objective_values(&self) -> &[f64] {
    &self.normalized_objective_values
  }

  /// Writes the normalized objective value at `index`, overwriting any prior
  /// value at the same index.
  pub fn set_normalized_objective_value(&mut self, index: usize, value: f64) {
    if self.normalized_objective_values.len() <= index {
      self.normalized_objective_values.resize(index, 0.0);
      self.normalized_objective_values.push(value);
    } else {
      self.normalized_objective_values[index] = value;
    }
  }

  /// The cached scalar fitness, if one was calculated.
  pub fn fitness(&self) -> Option<f64> {
    self.fitness
  }

  /// Caches a scalar fitness value. The ranking procedure itself never reads
  /// it.
  pub fn set_fitness(&mut self, fitness: f64) {
    self.fitness = Some(fitness);
  }
}
