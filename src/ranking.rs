//! The ranking engine: Pareto dominance, fast non-dominated sort, crowding
//! distance and crowded truncation of a merged population.

use std::cmp::Ordering;

use itertools::{Itertools, MinMaxResult};

use crate::{
  allele::Allele,
  chromosome::Chromosome,
  error::Error,
  population::Population,
};

// index of a chromosome in its population's storage
type ChromosomeIndex = usize;
// number of chromosomes dominating a chromosome
type DominanceCounter = u32;
// crowding distance of a chromosome
type CrowdingDistance = f64;
// indices of chromosomes dominated by a chromosome
type DominanceList = Vec<ChromosomeIndex>;
// indices of chromosomes of one front
type Front = Vec<ChromosomeIndex>;

/// Describes Pareto dominance for objective value vectors. All objectives
/// are minimized.
pub(crate) trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. A vector dominates another if it
  /// is no worse in every objective and strictly better in at least one.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [f64] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      match (ord, a.total_cmp(b)) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}

/// The result of one ranking pass over a population.
///
/// Holds the Pareto fronts, each chromosome's non-domination rank and its
/// crowding distance, all addressed by index into the ranked population's
/// storage. A `Ranking` is rebuilt from scratch by every call to [`rank`],
/// so stale domination state from a previous generation can never leak into
/// the next pass.
#[derive(Clone, Debug)]
pub struct Ranking {
  fronts: Vec<Front>,
  ranks: Vec<usize>,
  crowding_distances: Vec<CrowdingDistance>,
}

impl Ranking {
  /// Number of ranked chromosomes.
  pub fn individual_count(&self) -> usize {
    self.ranks.len()
  }

  /// The Pareto fronts in increasing rank order. Front 0 is the
  /// non-dominated set; every chromosome index appears in exactly one front.
  pub fn fronts(&self) -> &[Front] {
    &self.fronts
  }

  /// The rank of the chromosome at `index`. 0 is best.
  pub fn rank_of(&self, index: ChromosomeIndex) -> usize {
    self.ranks[index]
  }

  /// The crowding distance of the chromosome at `index`. Larger means more
  /// isolated within its front; front boundary chromosomes carry
  /// `f64::INFINITY`.
  pub fn crowding_distance_of(&self, index: ChromosomeIndex) -> f64 {
    self.crowding_distances[index]
  }

  /// The crowded comparison order: `Less` means the chromosome at `a` is
  /// better than the one at `b`. A lower rank wins outright; equal ranks are
  /// broken by the larger crowding distance.
  pub fn crowded_ordering(
    &self,
    a: ChromosomeIndex,
    b: ChromosomeIndex,
  ) -> Ordering {
    self.ranks[a].cmp(&self.ranks[b]).then_with(|| {
      self.crowding_distances[b].total_cmp(&self.crowding_distances[a])
    })
  }
}

/// Ranks a population: rescales its objective values, partitions it into
/// Pareto fronts with the fast non-dominated sort and assigns each front's
/// members their crowding distances.
///
/// Fails on an empty population and on individuals with mismatched objective
/// vector lengths, since dominance is undefined for both.
pub fn rank<A: Allele>(
  population: &mut Population<A>,
) -> Result<Ranking, Error> {
  if population.is_empty() {
    return Err(Error::EmptyPopulation { operation: "rank" });
  }
  let objective_count = population.get(0).objective_values().len();
  for chromosome in population.iter() {
    let found = chromosome.objective_values().len();
    if found != objective_count {
      return Err(Error::ObjectiveCountMismatch {
        expected: objective_count,
        found,
      });
    }
  }

  normalize_objective_values(population, objective_count);

  let size = population.size();
  let mut dominance_lists: Vec<DominanceList> = vec![Vec::new(); size];
  let mut dominance_counters: Vec<DominanceCounter> = vec![0; size];
  let mut first_front: Front = Vec::new();

  // fill dominance lists and counters
  for p_idx in 0..size {
    // for each unique pair of chromosomes `p` and `q`...
    for q_idx in p_idx + 1..size {
      let p_values = population.get(p_idx).objective_values();
      let q_values = population.get(q_idx).objective_values();
      match p_values.dominance(q_values) {
        // if chromosome `p` dominates chromosome `q`...
        Ordering::Less => {
          // put `q` into the list of chromosomes dominated by `p`
          dominance_lists[p_idx].push(q_idx);
          // and increment the counter of chromosomes dominating `q`
          dominance_counters[q_idx] += 1;
        }
        // if chromosome `q` dominates chromosome `p`...
        Ordering::Greater => {
          dominance_lists[q_idx].push(p_idx);
          dominance_counters[p_idx] += 1;
        }
        Ordering::Equal => {}
      }
    }
    // if no other chromosome dominates `p`, it belongs to the first front
    if dominance_counters[p_idx] == 0 {
      first_front.push(p_idx);
    }
  }

  debug_assert!(
    !first_front.is_empty(),
    "first front must have at least 1 chromosome"
  );

  // peel fronts until every chromosome is assigned a rank. each pass ranks
  // at least one chromosome, so this terminates in at most `size` passes
  let mut ranks = vec![usize::MAX; size];
  let mut fronts: Vec<Front> = Vec::new();
  let mut current_front = first_front;
  let mut front_index = 0;
  while !current_front.is_empty() {
    let mut next_front = Front::new();
    for &p_idx in &current_front {
      ranks[p_idx] = front_index;
      // for each chromosome `q` dominated by `p`...
      for &q_idx in &dominance_lists[p_idx] {
        // decrement the counter of chromosomes dominating `q`
        dominance_counters[q_idx] -= 1;
        // once no unranked chromosome dominates `q`, it joins the next front
        if dominance_counters[q_idx] == 0 {
          next_front.push(q_idx);
        }
      }
    }
    fronts.push(current_front);
    current_front = next_front;
    front_index += 1;
  }

  debug_assert!(
    ranks.iter().all(|r| *r != usize::MAX),
    "every chromosome must end up ranked"
  );

  let crowding_distances =
    crowding_distances(population, &fronts, objective_count);

  Ok(Ranking {
    fronts,
    ranks,
    crowding_distances,
  })
}

/// Rescales each objective across the population into `[0, 1]` and writes
/// the results into the chromosomes' normalized value caches. An objective
/// whose observed range is zero maps to 0 for every chromosome.
fn normalize_objective_values<A: Allele>(
  population: &mut Population<A>,
  objective_count: usize,
) {
  for objective in 0..objective_count {
    let minmax = population
      .iter()
      .map(|c| c.objective_values()[objective])
      .minmax_by(|a, b| a.total_cmp(b));
    let (min, max) = match minmax {
      MinMaxResult::NoElements => continue,
      MinMaxResult::OneElement(v) => (v, v),
      MinMaxResult::MinMax(min, max) => (min, max),
    };
    let range = max - min;
    for chromosome in population.iter_mut() {
      let value = if range == 0.0 {
        0.0
      } else {
        (chromosome.objective_values()[objective] - min) / range
      };
      chromosome.set_normalized_objective_value(objective, value);
    }
  }
}

/// Assigns every chromosome its crowding distance, front by front. A
/// chromosome's distance depends only on members of its own front.
fn crowding_distances<A: Allele>(
  population: &Population<A>,
  fronts: &[Front],
  objective_count: usize,
) -> Vec<CrowdingDistance> {
  let mut distances: Vec<CrowdingDistance> = vec![0.0; population.size()];
  for front in fronts {
    for objective in 0..objective_count {
      // sort the front's members by this objective's normalized value
      let mut sorted = front.clone();
      sorted.sort_by(|&a_idx, &b_idx| {
        population.get(a_idx).normalized_objective_values()[objective]
          .total_cmp(
            &population.get(b_idx).normalized_objective_values()[objective],
          )
      });

      // boundary chromosomes represent the extremes of the trade-off
      // surface and are preserved unconditionally
      distances[sorted[0]] = f64::INFINITY;
      distances[sorted[sorted.len() - 1]] = f64::INFINITY;

      let range = population
        .maximum_normalized_objective_value(objective)
        .zip(population.minimum_normalized_objective_value(objective))
        .map(|(max, min)| max - min)
        .unwrap_or(0.0);
      // a degenerate zero range contributes nothing
      if range == 0.0 {
        continue;
      }

      for window in sorted.windows(3) {
        let (prev_idx, idx, next_idx) = (window[0], window[1], window[2]);
        if distances[idx].is_finite() {
          let prev =
            population.get(prev_idx).normalized_objective_values()[objective];
          let next =
            population.get(next_idx).normalized_objective_values()[objective];
          distances[idx] += (next - prev) / range;
        }
      }
    }
  }
  distances
}

/// Truncates a merged parent+child population back to `target_size`.
///
/// Fronts are consumed in increasing rank order; a front that fits within
/// the remaining capacity is kept whole, and the front that would overflow
/// it is split by descending crowding distance, preserving diversity at
/// the rank boundary. Returns the surviving population together with its
/// carried-over ranking, re-addressed to the survivors' storage.
pub fn truncate<A: Allele>(
  population: Population<A>,
  ranking: &Ranking,
  target_size: usize,
) -> (Population<A>, Ranking) {
  debug_assert_eq!(
    population.size(),
    ranking.individual_count(),
    "ranking must describe the truncated population"
  );

  let mut survivors: Vec<ChromosomeIndex> = Vec::with_capacity(target_size);
  for front in ranking.fronts() {
    let capacity = target_size - survivors.len();
    if capacity == 0 {
      break;
    }
    if front.len() <= capacity {
      survivors.extend_from_slice(front);
    } else {
      // the overflow front keeps only its least crowded members
      let mut overflow = front.clone();
      overflow.sort_by(|&a_idx, &b_idx| {
        ranking
          .crowding_distance_of(b_idx)
          .total_cmp(&ranking.crowding_distance_of(a_idx))
      });
      survivors.extend_from_slice(&overflow[..capacity]);
    }
  }

  let mut ranks = Vec::with_capacity(survivors.len());
  let mut crowding_distances = Vec::with_capacity(survivors.len());
  let mut fronts: Vec<Front> = Vec::new();
  for (position, &idx) in survivors.iter().enumerate() {
    let rank = ranking.rank_of(idx);
    ranks.push(rank);
    crowding_distances.push(ranking.crowding_distance_of(idx));
    while fronts.len() <= rank {
      fronts.push(Front::new());
    }
    fronts[rank].push(position);
  }

  // move the surviving chromosomes out without cloning them
  let mut members: Vec<_> =
    population.into_populace().into_iter().map(Some).collect();
  let populace: Vec<Chromosome<A>> = survivors
    .into_iter()
    .map(|idx| members[idx].take().expect("must be something here"))
    .collect();

  (
    Population::new(populace),
    Ranking {
      fronts,
      ranks,
      crowding_distances,
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::allele::BooleanAllele;

  fn population_from(
    objective_vectors: &[&[f64]],
  ) -> Population<BooleanAllele> {
    let populace = objective_vectors
      .iter()
      .map(|values| {
        let mut chromosome = Chromosome::new(vec![BooleanAllele(false)]);
        for (index, value) in values.iter().enumerate() {
          chromosome.set_objective_value(index, *value);
        }
        chromosome
      })
      .collect();
    Population::new(populace)
  }

  #[test]
  fn test_pareto_dominance() {
    assert_eq!([1.0, 1.0].dominance(&[2.0, 2.0]), Ordering::Less);
    assert_eq!([2.0, 2.0].dominance(&[1.0, 1.0]), Ordering::Greater);
    assert_eq!([1.0, 2.0].dominance(&[1.0, 3.0]), Ordering::Less);
    assert_eq!([1.0, 5.0].dominance(&[5.0, 1.0]), Ordering::Equal);
    assert_eq!([3.0, 3.0].dominance(&[3.0, 3.0]), Ordering::Equal);
    assert_eq!([1.0; 0].dominance(&[2.0; 0]), Ordering::Equal);
  }

  #[test]
  fn test_mutually_non_dominated_set_forms_one_front() {
    let mut population =
      population_from(&[&[1.0, 5.0], &[2.0, 3.0], &[3.0, 2.0], &[5.0, 1.0]]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.fronts().len(), 1);
    for index in 0..population.size() {
      assert_eq!(ranking.rank_of(index), 0);
    }
  }

  #[test]
  fn test_dominated_chromosome_falls_to_second_front() {
    let mut population = population_from(&[&[1.0, 1.0], &[2.0, 2.0]]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.rank_of(0), 0);
    assert_eq!(ranking.rank_of(1), 1);
    assert_eq!(ranking.fronts(), &[vec![0], vec![1]]);
  }

  #[test]
  fn test_ranks_partition_population_without_gaps() {
    let mut population = population_from(&[
      &[1.0, 4.0],
      &[4.0, 1.0],
      &[2.0, 5.0],
      &[5.0, 2.0],
      &[6.0, 6.0],
    ]);
    let ranking = rank(&mut population).unwrap();
    let ranked: usize = ranking.fronts().iter().map(|f| f.len()).sum();
    assert_eq!(ranked, population.size());
    for (expected_rank, front) in ranking.fronts().iter().enumerate() {
      assert!(!front.is_empty());
      for &index in front {
        assert_eq!(ranking.rank_of(index), expected_rank);
      }
    }
  }

  #[test]
  fn test_rank_ordering_is_consistent_with_dominance() {
    let mut population = population_from(&[
      &[1.0, 4.0],
      &[4.0, 1.0],
      &[2.0, 5.0],
      &[5.0, 2.0],
      &[6.0, 6.0],
      &[3.0, 3.0],
    ]);
    let ranking = rank(&mut population).unwrap();
    for a in 0..population.size() {
      for b in 0..population.size() {
        if ranking.rank_of(a) < ranking.rank_of(b) {
          let dominance = population
            .get(a)
            .objective_values()
            .dominance(population.get(b).objective_values());
          assert_ne!(
            dominance,
            Ordering::Greater,
            "a better ranked chromosome must not be dominated"
          );
        }
      }
    }
  }

  #[test]
  fn test_front_extremes_get_infinite_crowding_distance() {
    let mut population =
      population_from(&[&[1.0, 5.0], &[2.0, 3.0], &[3.0, 2.0], &[5.0, 1.0]]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.crowding_distance_of(0), f64::INFINITY);
    assert_eq!(ranking.crowding_distance_of(3), f64::INFINITY);
    assert!(ranking.crowding_distance_of(1).is_finite());
    assert!(ranking.crowding_distance_of(2).is_finite());
    // the two interior points are symmetric under objective swap, so their
    // distances coincide
    assert_eq!(ranking.crowding_distance_of(1), 1.25);
    assert_eq!(ranking.crowding_distance_of(2), 1.25);
  }

  #[test]
  fn test_interior_crowding_distances_ordered_by_spacing() {
    let mut population =
      population_from(&[&[1.0, 5.0], &[2.0, 3.0], &[4.0, 2.0], &[5.0, 1.0]]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.crowding_distance_of(1), 1.5);
    assert_eq!(ranking.crowding_distance_of(2), 1.25);
    assert!(
      ranking.crowding_distance_of(1) > ranking.crowding_distance_of(2),
      "the more isolated chromosome must score a larger distance"
    );
  }

  #[test]
  fn test_degenerate_zero_objective_range() {
    let mut population =
      population_from(&[&[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.fronts().len(), 1);
    let mut distances: Vec<f64> = (0..3)
      .map(|index| ranking.crowding_distance_of(index))
      .collect();
    distances.sort_by(f64::total_cmp);
    // no NaN from the zero range: the interior chromosome accumulates
    // nothing, the sort boundaries stay infinite
    assert_eq!(distances, [0.0, f64::INFINITY, f64::INFINITY]);
  }

  #[test]
  fn test_crowding_distances_are_non_negative() {
    let mut population = population_from(&[
      &[1.0, 4.0],
      &[4.0, 1.0],
      &[2.0, 5.0],
      &[5.0, 2.0],
      &[3.0, 3.0],
    ]);
    let ranking = rank(&mut population).unwrap();
    for index in 0..population.size() {
      assert!(ranking.crowding_distance_of(index) >= 0.0);
    }
  }

  #[test]
  fn test_rank_of_empty_population_fails() {
    let mut population = Population::<BooleanAllele>::new(vec![]);
    assert!(matches!(
      rank(&mut population),
      Err(Error::EmptyPopulation { .. })
    ));
  }

  #[test]
  fn test_rank_of_mismatched_objective_vectors_fails() {
    let mut population = population_from(&[&[1.0, 2.0], &[1.0]]);
    assert!(matches!(
      rank(&mut population),
      Err(Error::ObjectiveCountMismatch {
        expected: 2,
        found: 1
      })
    ));
  }

  #[test]
  fn test_truncation_keeps_better_fronts_whole() {
    // three mutually non-dominated chromosomes and three dominated ones
    let mut population = population_from(&[
      &[1.0, 5.0],
      &[2.0, 3.0],
      &[5.0, 1.0],
      &[2.0, 6.0],
      &[3.0, 3.0],
      &[6.0, 2.0],
    ]);
    let ranking = rank(&mut population).unwrap();
    assert_eq!(ranking.fronts()[0], vec![0, 1, 2]);
    assert_eq!(ranking.fronts()[1], vec![3, 4, 5]);

    let (survivors, carried) = truncate(population, &ranking, 4);
    assert_eq!(survivors.size(), 4);
    // the whole first front survives...
    assert_eq!(carried.fronts()[0].len(), 3);
    // ...and the slot left for the overflow front goes to one of its
    // infinitely crowded boundary members, never to its interior one
    assert_eq!(carried.fronts()[1].len(), 1);
    let boundary = carried.fronts()[1][0];
    assert_eq!(carried.rank_of(boundary), 1);
    assert_eq!(carried.crowding_distance_of(boundary), f64::INFINITY);
    assert_ne!(survivors.get(boundary).objective_values(), &[3.0, 3.0]);
  }

  #[test]
  fn test_truncation_prefers_less_crowded_overflow_members() {
    let mut population = population_from(&[
      &[1.0, 5.0],
      &[2.0, 3.0],
      &[3.0, 2.0],
      &[5.0, 1.0],
    ]);
    let ranking = rank(&mut population).unwrap();
    let (survivors, carried) = truncate(population, &ranking, 2);
    assert_eq!(survivors.size(), 2);
    // every kept member's distance is at least every discarded member's
    for kept in 0..survivors.size() {
      assert_eq!(carried.crowding_distance_of(kept), f64::INFINITY);
    }
  }

  #[test]
  fn test_truncation_to_full_size_is_identity() {
    let mut population = population_from(&[&[1.0, 1.0], &[2.0, 2.0]]);
    let ranking = rank(&mut population).unwrap();
    let (survivors, carried) = truncate(population, &ranking, 2);
    assert_eq!(survivors.size(), 2);
    assert_eq!(carried.rank_of(0), 0);
    assert_eq!(carried.rank_of(1), 1);
  }

  #[test]
  fn test_crowded_ordering() {
    let mut population =
      population_from(&[&[1.0, 5.0], &[2.0, 3.0], &[3.0, 2.0], &[4.0, 4.0]]);
    let ranking = rank(&mut population).unwrap();
    // chromosome 3 is dominated by 1 and 2, so any rank 0 member beats it
    assert_eq!(ranking.crowded_ordering(0, 3), Ordering::Less);
    assert_eq!(ranking.crowded_ordering(3, 0), Ordering::Greater);
    // equal ranks fall back to crowding distance: boundary beats interior
    assert_eq!(ranking.crowded_ordering(0, 1), Ordering::Less);
    assert_eq!(ranking.crowded_ordering(1, 0), Ordering::Greater);
  }
}
