//! Parent selection operators.

use rand::Rng;

use crate::{allele::Allele, population::Population, ranking::Ranking};

/// Draws two chromosomes uniformly at random from the population and returns
/// the index of the crowded comparison winner: the lower ranked one, or on a
/// rank tie the one with the larger crowding distance.
pub fn crowded_binary_tournament(ranking: &Ranking) -> usize {
  debug_assert!(
    ranking.individual_count() > 0,
    "tournament needs a non-empty population"
  );
  let mut rng = rand::thread_rng();
  let a = rng.gen_range(0..ranking.individual_count());
  let b = rng.gen_range(0..ranking.individual_count());
  match ranking.crowded_ordering(a, b) {
    std::cmp::Ordering::Greater => b,
    _ => a,
  }
}

/// An operator that picks the two chromosomes a crossover recombines.
/// Returns indices into the population's storage.
///
/// Implemented by any closure of type
/// `Fn(&Population<A>, &Ranking) -> [usize; 2]`.
///
/// **Note that you always can implement this trait instead of using
/// closures.**
pub trait ParticipantSelector<A: Allele>: Send + Sync {
  /// Selects two parents from the population.
  fn select(&self, population: &Population<A>, ranking: &Ranking)
    -> [usize; 2];
}

impl<A, F> ParticipantSelector<A> for F
where
  A: Allele,
  F: Fn(&Population<A>, &Ranking) -> [usize; 2] + Send + Sync,
{
  fn select(
    &self,
    population: &Population<A>,
    ranking: &Ranking,
  ) -> [usize; 2] {
    self(population, ranking)
  }
}

/// The default participant selector: two independent crowded binary
/// tournaments. The same chromosome may win both.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CrowdedTournamentSelector();

impl<A: Allele> ParticipantSelector<A> for CrowdedTournamentSelector {
  fn select(&self, _: &Population<A>, ranking: &Ranking) -> [usize; 2] {
    [
      crowded_binary_tournament(ranking),
      crowded_binary_tournament(ranking),
    ]
  }
}
