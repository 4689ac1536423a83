//! Crossover operators.

use rand::Rng;

use crate::{
  allele::Allele,
  chromosome::Chromosome,
  error::Error,
  population::Population,
  ranking::Ranking,
  selection::{CrowdedTournamentSelector, ParticipantSelector},
};

/// An operator that produces exactly two offspring from a ranked population.
///
/// An implementation picks its own parents, usually through a
/// [`ParticipantSelector`]. The returned chromosomes must be freshly owned:
/// they never alias members of the population they were bred from.
pub trait Crossover<A: Allele>: Send + Sync {
  /// Produces two offspring from the population.
  fn perform(
    &self,
    population: &Population<A>,
    ranking: &Ranking,
  ) -> Result<[Chromosome<A>; 2], Error>;
}

/// Uniform crossover: each offspring inherits, per gene position
/// independently, the allele of one of the two selected parents.
///
/// With probability `1 - crossover_probability` no recombination happens and
/// the two selected parents are returned as plain copies instead. The
/// default probability is `0.7` and the default participant selector is a
/// pair of crowded binary tournaments.
pub struct UniformCrossover<A: Allele> {
  crossover_probability: f32,
  participant_selector: Box<dyn ParticipantSelector<A>>,
}

impl<A: Allele> UniformCrossover<A> {
  /// Creates a uniform crossover firing with given probability, with the
  /// default tournament participant selector.
  pub fn new(crossover_probability: f32) -> Self {
    Self {
      crossover_probability,
      participant_selector: Box::new(CrowdedTournamentSelector::default()),
    }
  }

  /// Replaces the participant selector.
  pub fn with_participant_selector(
    mut self,
    participant_selector: Box<dyn ParticipantSelector<A>>,
  ) -> Self {
    self.participant_selector = participant_selector;
    self
  }

  fn breed_child(
    &self,
    first_parent: &Chromosome<A>,
    second_parent: &Chromosome<A>,
  ) -> Chromosome<A> {
    let mut rng = rand::thread_rng();
    let genetic_code = first_parent
      .genetic_code()
      .iter()
      .zip(second_parent.genetic_code())
      .map(|(a, b)| if rng.gen_bool(0.5) { a.clone() } else { b.clone() })
      .collect();
    Chromosome::new(genetic_code)
  }
}

impl<A: Allele> Default for UniformCrossover<A> {
  fn default() -> Self {
    Self::new(0.7)
  }
}

impl<A: Allele> Crossover<A> for UniformCrossover<A> {
  fn perform(
    &self,
    population: &Population<A>,
    ranking: &Ranking,
  ) -> Result<[Chromosome<A>; 2], Error> {
    if population.is_empty() {
      return Err(Error::EmptyPopulation {
        operation: "crossover",
      });
    }
    let [first_idx, second_idx] =
      self.participant_selector.select(population, ranking);
    let first_parent = population.get(first_idx);
    let second_parent = population.get(second_idx);
    if rand::thread_rng().gen::<f32>() <= self.crossover_probability {
      Ok([
        self.breed_child(first_parent, second_parent),
        self.breed_child(first_parent, second_parent),
      ])
    } else {
      // no recombination: hand back plain parent copies
      Ok([first_parent.clone(), second_parent.clone()])
    }
  }
}
