//! Objective functions, fitness calculators and population evaluation.

use rayon::prelude::*;

use crate::{
  allele::Allele,
  chromosome::Chromosome,
  error::Error,
  population::Population,
};

/// An objective function: maps a chromosome's genotype to one real valued
/// objective to be minimized.
///
/// Any closure of type `Fn(&Chromosome<A>) -> Result<f64, Error>` implements
/// this trait. Errors returned from an objective abort the current
/// generation and propagate to the caller of the optimizer unmodified.
///
/// # Examples
/// ```
/// # use nsgaii::{allele::BooleanAllele, chromosome::Chromosome, Error};
/// let ones = |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
///   Ok(c.genetic_code().iter().filter(|a| a.0).count() as f64)
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using
/// closures.**
pub trait ObjectiveFunction<A: Allele>: Send + Sync {
  /// A human readable name of the objective.
  fn label(&self) -> &str {
    "objective"
  }

  /// Evaluates the objective for given chromosome.
  fn value(&self, chromosome: &Chromosome<A>) -> Result<f64, Error>;
}

impl<A, F> ObjectiveFunction<A> for F
where
  A: Allele,
  F: Fn(&Chromosome<A>) -> Result<f64, Error> + Send + Sync,
{
  fn value(&self, chromosome: &Chromosome<A>) -> Result<f64, Error> {
    self(chromosome)
  }
}

/// Maps a chromosome to a scalar fitness value inside a declared range.
///
/// Objective functions typically decode a genotype through a fitness
/// calculator first, then apply their actual formula to the decoded value.
/// Implemented by any closure of type
/// `Fn(&Chromosome<A>) -> Result<f64, Error>`.
pub trait FitnessCalculator<A: Allele>: Send + Sync {
  /// Calculates the fitness of given chromosome.
  fn fitness(&self, chromosome: &Chromosome<A>) -> Result<f64, Error>;
}

impl<A, F> FitnessCalculator<A> for F
where
  A: Allele,
  F: Fn(&Chromosome<A>) -> Result<f64, Error> + Send + Sync,
{
  fn fitness(&self, chromosome: &Chromosome<A>) -> Result<f64, Error> {
    self(chromosome)
  }
}

/// A [`FitnessCalculator`] that reads a bit encoded genetic code as a big
/// endian integer and linearly rescales it from `[actual_min, actual_max]`
/// into `[normalized_min, normalized_max]`.
///
/// Rejects genotypes that are not bit based with
/// [`Error::RepresentationMismatch`] rather than misinterpreting their
/// contents.
#[derive(Clone, Copy, Debug)]
pub struct NormalizedGeneticCodeValue {
  actual_min: f64,
  actual_max: f64,
  normalized_min: f64,
  normalized_max: f64,
}

impl NormalizedGeneticCodeValue {
  /// Creates a calculator rescaling `[actual_min, actual_max]` into
  /// `[normalized_min, normalized_max]`.
  pub fn new(
    actual_min: f64,
    actual_max: f64,
    normalized_min: f64,
    normalized_max: f64,
  ) -> Self {
    Self {
      actual_min,
      actual_max,
      normalized_min,
      normalized_max,
    }
  }
}

impl<A: Allele> FitnessCalculator<A> for NormalizedGeneticCodeValue {
  fn fitness(&self, chromosome: &Chromosome<A>) -> Result<f64, Error> {
    let mut value = 0.0;
    for allele in chromosome.genetic_code() {
      let bit = allele.as_bit().ok_or(Error::RepresentationMismatch {
        operator: "NormalizedGeneticCodeValue",
      })?;
      value = value * 2.0 + f64::from(u8::from(bit));
    }
    let actual_range = self.actual_max - self.actual_min;
    if actual_range == 0.0 {
      return Ok(self.normalized_min);
    }
    Ok(
      self.normalized_min
        + (value - self.actual_min)
          * (self.normalized_max - self.normalized_min)
          / actual_range,
    )
  }
}

/// Evaluates every objective for every member of the population, writing the
/// rounded objective values into each chromosome's cache and overwriting any
/// prior values. Individuals are evaluated in parallel.
pub fn evaluate_population<A: Allele>(
  population: &mut Population<A>,
  objectives: &[Box<dyn ObjectiveFunction<A>>],
) -> Result<(), Error> {
  population.as_mut_slice().par_iter_mut().try_for_each(
    |chromosome| -> Result<(), Error> {
      for (index, objective) in objectives.iter().enumerate() {
        let value = objective.value(chromosome)?;
        chromosome.set_objective_value(index, value);
      }
      Ok(())
    },
  )
}
