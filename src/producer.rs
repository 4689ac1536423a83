//! Producers of genetic codes, initial populations and child populations,
//! with the default implementations used by the optimizer.

use rand::Rng;

use crate::{
  allele::Allele,
  chromosome::Chromosome,
  crossover::Crossover,
  error::Error,
  mutation::Mutation,
  objective::FitnessCalculator,
  population::Population,
  ranking::Ranking,
  selection::crowded_binary_tournament,
};

/// Supplies random genetic codes for the initial generation.
///
/// Implemented by any closure of type `Fn(usize) -> Result<Vec<A>, Error>`.
pub trait GenotypeProducer<A: Allele>: Send + Sync {
  /// Produces a genetic code of `length` alleles.
  fn produce(&self, length: usize) -> Result<Vec<A>, Error>;
}

impl<A, F> GenotypeProducer<A> for F
where
  A: Allele,
  F: Fn(usize) -> Result<Vec<A>, Error> + Send + Sync,
{
  fn produce(&self, length: usize) -> Result<Vec<A>, Error> {
    self(length)
  }
}

/// The default genotype producer: a sequence of uniformly random bits.
/// Rejects allele types without a bit representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RandomBitProducer();

impl<A: Allele> GenotypeProducer<A> for RandomBitProducer {
  fn produce(&self, length: usize) -> Result<Vec<A>, Error> {
    let mut rng = rand::thread_rng();
    (0..length)
      .map(|_| {
        A::from_bit(rng.gen_bool(0.5)).ok_or(Error::RepresentationMismatch {
          operator: "RandomBitProducer",
        })
      })
      .collect()
  }
}

/// Builds the initial generation from a genotype producer, optionally
/// caching each chromosome's scalar fitness.
pub trait PopulationProducer<A: Allele>: Send + Sync {
  /// Produces the initial population.
  fn produce(
    &self,
    population_size: usize,
    chromosome_length: usize,
    genotype_producer: &dyn GenotypeProducer<A>,
    fitness_calculator: Option<&dyn FitnessCalculator<A>>,
  ) -> Result<Population<A>, Error>;
}

/// The default population producer: `population_size` chromosomes built
/// from freshly produced genetic codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct DefaultPopulationProducer();

impl<A: Allele> PopulationProducer<A> for DefaultPopulationProducer {
  fn produce(
    &self,
    population_size: usize,
    chromosome_length: usize,
    genotype_producer: &dyn GenotypeProducer<A>,
    fitness_calculator: Option<&dyn FitnessCalculator<A>>,
  ) -> Result<Population<A>, Error> {
    let mut populace = Vec::with_capacity(population_size);
    for _ in 0..population_size {
      let mut chromosome =
        Chromosome::new(genotype_producer.produce(chromosome_length)?);
      if let Some(calculator) = fitness_calculator {
        let fitness = calculator.fitness(&chromosome)?;
        chromosome.set_fitness(fitness);
      }
      populace.push(chromosome);
    }
    Ok(Population::new(populace))
  }
}

/// Derives a child population of a fixed size from a ranked parent
/// population through selection, crossover and mutation.
pub trait ChildPopulationProducer<A: Allele>: Send + Sync {
  /// Produces a child population of exactly `target_size` members.
  fn produce(
    &self,
    parent: &Population<A>,
    ranking: &Ranking,
    crossover: &dyn Crossover<A>,
    mutation: &dyn Mutation<A>,
    target_size: usize,
  ) -> Result<Population<A>, Error>;
}

/// The default child population producer.
///
/// Repeatedly crosses two tournament selected parents and mutates each
/// offspring until the child population is full. An odd final slot is
/// filled by mutating a single tournament winner instead of breeding a
/// pair, so the produced size matches `target_size` exactly for even and
/// odd targets alike.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TournamentChildProducer();

impl<A: Allele> ChildPopulationProducer<A> for TournamentChildProducer {
  fn produce(
    &self,
    parent: &Population<A>,
    ranking: &Ranking,
    crossover: &dyn Crossover<A>,
    mutation: &dyn Mutation<A>,
    target_size: usize,
  ) -> Result<Population<A>, Error> {
    if parent.is_empty() {
      return Err(Error::EmptyPopulation {
        operation: "breed children from",
      });
    }
    let mut populace = Vec::with_capacity(target_size);
    while populace.len() < target_size {
      if target_size - populace.len() == 1 {
        let winner = crowded_binary_tournament(ranking);
        populace.push(mutation.perform(parent.get(winner))?);
      } else {
        for offspring in crossover.perform(parent, ranking)? {
          populace.push(mutation.perform(&offspring)?);
        }
      }
    }
    Ok(Population::new(populace))
  }
}
