//! The NSGA-II evolution engine.

use tracing::debug;
use typed_builder::TypedBuilder;

use crate::{
  allele::Allele,
  crossover::{Crossover, UniformCrossover},
  error::Error,
  mutation::{Mutation, SinglePointMutation},
  objective::{evaluate_population, FitnessCalculator, ObjectiveFunction},
  optimizer::Optimizer,
  population::Population,
  producer::{
    ChildPopulationProducer,
    DefaultPopulationProducer,
    GenotypeProducer,
    PopulationProducer,
    RandomBitProducer,
    TournamentChildProducer,
  },
  ranking::{rank, truncate},
  report::{GenerationObserver, SilentObserver},
};

/// The NSGA-II generational engine.
///
/// Owns a parent population and, for a configured number of generations,
/// derives a child population through crowded tournament selection,
/// crossover and mutation, evaluates it, merges it with the parent,
/// re-ranks the merged set and truncates it back to the population size by
/// rank and crowding distance.
///
/// Every pluggable part has a default suited to bit encoded genotypes, so
/// the only required input is the list of objective functions:
/// ```no_run
/// # use nsgaii::{
/// #   allele::BooleanAllele,
/// #   chromosome::Chromosome,
/// #   objective::ObjectiveFunction,
/// #   optimizer::{nsga2::Nsga2, Optimizer},
/// #   Error,
/// # };
/// let ones = |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
///   Ok(c.genetic_code().iter().filter(|a| a.0).count() as f64)
/// };
/// let zeros = |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
///   Ok(c.genetic_code().iter().filter(|a| !a.0).count() as f64)
/// };
/// let objectives: Vec<Box<dyn ObjectiveFunction<BooleanAllele>>> =
///   vec![Box::new(ones), Box::new(zeros)];
/// let front = Nsga2::builder()
///   .objectives(objectives)
///   .build()
///   .optimize()
///   .unwrap();
/// ```
#[derive(TypedBuilder)]
pub struct Nsga2<A: Allele> {
  /// Number of individuals each generation's parent population holds.
  #[builder(default = 100)]
  population_size: usize,
  /// Number of alleles in every chromosome of the run.
  #[builder(default = 20)]
  chromosome_length: usize,
  /// Number of generations to evolve.
  #[builder(default = 25)]
  generations: usize,
  /// The objective functions compared under dominance, all minimized.
  objectives: Vec<Box<dyn ObjectiveFunction<A>>>,
  #[builder(
    default = Box::new(UniformCrossover::<A>::default())
      as Box<dyn Crossover<A>>
  )]
  crossover: Box<dyn Crossover<A>>,
  #[builder(
    default = Box::new(SinglePointMutation::default()) as Box<dyn Mutation<A>>
  )]
  mutation: Box<dyn Mutation<A>>,
  #[builder(
    default = Box::new(RandomBitProducer::default())
      as Box<dyn GenotypeProducer<A>>
  )]
  genotype_producer: Box<dyn GenotypeProducer<A>>,
  #[builder(
    default = Box::new(DefaultPopulationProducer::default())
      as Box<dyn PopulationProducer<A>>
  )]
  population_producer: Box<dyn PopulationProducer<A>>,
  #[builder(
    default = Box::new(TournamentChildProducer::default())
      as Box<dyn ChildPopulationProducer<A>>
  )]
  child_producer: Box<dyn ChildPopulationProducer<A>>,
  /// An optional calculator caching each initial chromosome's fitness.
  #[builder(default, setter(strip_option))]
  fitness_calculator: Option<Box<dyn FitnessCalculator<A>>>,
  #[builder(
    default = Box::new(SilentObserver::default())
      as Box<dyn GenerationObserver<A>>
  )]
  observer: Box<dyn GenerationObserver<A>>,
}

impl<A: Allele> Optimizer<A> for Nsga2<A> {
  fn optimize(mut self) -> Result<Population<A>, Error> {
    let mut parent = self.population_producer.produce(
      self.population_size,
      self.chromosome_length,
      self.genotype_producer.as_ref(),
      self.fitness_calculator.as_deref(),
    )?;
    evaluate_population(&mut parent, &self.objectives)?;
    let mut ranking = rank(&mut parent)?;
    debug!(
      population_size = parent.size(),
      objectives =
        ?self.objectives.iter().map(|o| o.label()).collect::<Vec<_>>(),
      "initial population ranked"
    );

    for generation in 0..self.generations {
      let mut child = self.child_producer.produce(
        &parent,
        &ranking,
        self.crossover.as_ref(),
        self.mutation.as_ref(),
        self.population_size,
      )?;
      evaluate_population(&mut child, &self.objectives)?;
      self.observer.on_generation(&parent, &child, generation);

      // merge, re-rank from scratch and truncate back to size
      let mut combined = parent;
      combined.append(&mut child);
      let combined_ranking = rank(&mut combined)?;
      (parent, ranking) =
        truncate(combined, &combined_ranking, self.population_size);

      debug_assert_eq!(
        parent.size(),
        self.population_size,
        "truncation must restore the parent population size"
      );
      debug!(
        generation,
        fronts = ranking.fronts().len(),
        first_front = ranking.fronts()[0].len(),
        "generation evolved"
      );
    }

    Ok(parent)
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::{
    allele::BooleanAllele,
    chromosome::Chromosome,
    objective::NormalizedGeneticCodeValue,
    ranking::ParetoDominance,
  };

  const CHROMOSOME_LENGTH: usize = 12;

  /// Schaffer's problem No.1 on a bit genotype decoded into `[0, 2]`.
  fn schaffer_objectives(
  ) -> Vec<Box<dyn ObjectiveFunction<BooleanAllele>>> {
    let calculator = NormalizedGeneticCodeValue::new(
      0.0,
      2f64.powi(CHROMOSOME_LENGTH as i32) - 1.0,
      0.0,
      2.0,
    );
    let f1 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
      let x = calculator.fitness(c)?;
      Ok(x * x)
    };
    let f2 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
      let x = calculator.fitness(c)?;
      Ok((x - 2.0) * (x - 2.0))
    };
    vec![Box::new(f1), Box::new(f2)]
  }

  #[test]
  fn test_run_returns_population_of_configured_size() {
    let front = Nsga2::builder()
      .population_size(20)
      .chromosome_length(CHROMOSOME_LENGTH)
      .generations(10)
      .objectives(schaffer_objectives())
      .build()
      .optimize()
      .unwrap();
    assert_eq!(front.size(), 20);
    for chromosome in front.iter() {
      assert_eq!(chromosome.len(), CHROMOSOME_LENGTH);
      assert_eq!(chromosome.objective_values().len(), 2);
    }
  }

  #[test]
  fn test_odd_population_size_is_conserved() {
    let front = Nsga2::builder()
      .population_size(13)
      .chromosome_length(CHROMOSOME_LENGTH)
      .generations(5)
      .objectives(schaffer_objectives())
      .build()
      .optimize()
      .unwrap();
    assert_eq!(front.size(), 13);
  }

  #[test]
  fn test_final_population_contains_non_dominated_core() {
    let front = Nsga2::builder()
      .population_size(16)
      .chromosome_length(CHROMOSOME_LENGTH)
      .generations(15)
      .objectives(schaffer_objectives())
      .build()
      .optimize()
      .unwrap();
    // at least one survivor must be non-dominated within the final
    // population
    let non_dominated = (0..front.size()).any(|a| {
      (0..front.size()).all(|b| {
        front
          .get(b)
          .objective_values()
          .dominance(front.get(a).objective_values())
          != std::cmp::Ordering::Less
      })
    });
    assert!(non_dominated);
  }

  #[test]
  fn test_observer_sees_every_generation() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let observer = move |_: &Population<BooleanAllele>,
                         child: &Population<BooleanAllele>,
                         generation: usize| {
      log.borrow_mut().push((generation, child.size()));
    };
    Nsga2::builder()
      .population_size(8)
      .chromosome_length(CHROMOSOME_LENGTH)
      .generations(4)
      .objectives(schaffer_objectives())
      .observer(Box::new(observer))
      .build()
      .optimize()
      .unwrap();
    assert_eq!(*seen.borrow(), vec![(0, 8), (1, 8), (2, 8), (3, 8)]);
  }

  #[test]
  fn test_zero_sized_population_fails() {
    let result = Nsga2::builder()
      .population_size(0)
      .objectives(schaffer_objectives())
      .build()
      .optimize();
    assert!(matches!(result, Err(Error::EmptyPopulation { .. })));
  }

  #[test]
  fn test_fitness_calculator_seeds_initial_fitness() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let observer = move |parent: &Population<BooleanAllele>,
                         _: &Population<BooleanAllele>,
                         generation: usize| {
      if generation == 0 {
        log.borrow_mut().extend(parent.iter().map(|c| c.fitness()));
      }
    };
    Nsga2::builder()
      .population_size(6)
      .chromosome_length(CHROMOSOME_LENGTH)
      .generations(1)
      .objectives(schaffer_objectives())
      .fitness_calculator(Box::new(NormalizedGeneticCodeValue::new(
        0.0,
        2f64.powi(CHROMOSOME_LENGTH as i32) - 1.0,
        0.0,
        2.0,
      )))
      .observer(Box::new(observer))
      .build()
      .optimize()
      .unwrap();
    let first_generation_fitness = seen.borrow();
    assert_eq!(first_generation_fitness.len(), 6);
    for fitness in first_generation_fitness.iter() {
      let fitness = fitness.expect("initial fitness must be cached");
      assert!((0.0..=2.0).contains(&fitness));
    }
  }
}
