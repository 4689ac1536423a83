//! **nsgaii** is an implementation of the NSGA-II multi-objective genetic
//! algorithm over fixed-length chromosomes. It strives to be simple,
//! pluggable and highly focused on usage of closures.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! This crate defines a few abstractions that allow for flexible construction
//! of an NSGA-II run. Knowing them helps you to understand the workflow of
//! this framework.
//! - A **chromosome** is a fixed-length sequence of **alleles** together with
//!   the objective values computed for it
//! - A **population** is an ordered collection of chromosomes on which every
//!   generational step operates
//! - **Producers** create populations: one builds the random initial
//!   population, another breeds a child population from a ranked parent
//!   population with crossover and mutation
//! - **Objective functions** score each chromosome, and the **ranking** pass
//!   sorts a scored population into non-dominated fronts and measures
//!   crowding within each front
//! - An **optimizer** wires all of the above into the NSGA-II loop:
//!   1. **Produce** a child population from the current parents
//!   2. **Evaluate** every child against each objective
//!   3. **Merge** parents and children, **rank** the combined population
//!   4. **Truncate** the combined population back to the configured size,
//!      preferring lower ranks and, within a front, higher crowding distance
//!
//! In general, a user supplies objective functions and, optionally, custom
//! operators to [`Nsga2`], which runs the loop for a fixed number of
//! generations and returns the final population, its first front holding the
//! best approximation of the Pareto set found so far.
//!
//! # Operators
//!
//! Every seam of the loop is a trait with a default implementation, so the
//! simplest useful optimizer needs nothing but objectives. The table below
//! lists the traits and the implementation you get when you don't supply
//! your own.
//!
//! |                          | Trait                     | Default                      |
//! |:-------------------------|:--------------------------|:-----------------------------|
//! | **Genotype creation**    | [`GenotypeProducer`]      | [`RandomBitProducer`]        |
//! | **Initial population**   | [`PopulationProducer`]    | [`DefaultPopulationProducer`]|
//! | **Child breeding**       | [`ChildPopulationProducer`] | [`TournamentChildProducer`]|
//! | **Crossover**            | [`Crossover`]             | [`UniformCrossover`]         |
//! | **Mutation**             | [`Mutation`]              | [`SinglePointMutation`]      |
//! | **Parent selection**     | [`ParticipantSelector`]   | [`CrowdedTournamentSelector`]|
//! | **Progress reporting**   | [`GenerationObserver`]    | [`SilentObserver`]           |
//!
//! # Closures
//!
//! Most of these traits are implemented by closures. For example, an
//! [`ObjectiveFunction`] takes a reference to a [`Chromosome`] and returns a
//! `Result<f64, Error>` - one such function per objective. Thus, instead of
//! implementing the trait for some struct, you can just create a closure of
//! type `Fn(&Chromosome<A>) -> Result<f64, Error>`. Consult the
//! *Implementors* section of each trait's documentation to see what closures
//! implement it.
//!
//! Note, however, that this generic implementation leads to unreadable
//! compiler error messages that appear not at closure definition, but at
//! creation of an optimizer. If you are struggling with a closure, maybe
//! you should implement a trait directly instead. These implementations are
//! resolved during compilation, so neither approach is less performant.
//!
//! # Representation
//!
//! Chromosomes are generic over their [`Allele`] type. The bit-string
//! operators shipped with this crate ([`RandomBitProducer`],
//! [`SinglePointMutation`], [`NormalizedGeneticCodeValue`]) work on any
//! allele that exposes a bit view through [`Allele::as_bit`], such as
//! [`BooleanAllele`]. Applying them to an allele without a bit view fails at
//! runtime with [`Error::RepresentationMismatch`] rather than silently doing
//! the wrong thing.
//!
//! # Example
//!
//! Here's a solution for the textbook *Schaffer's Problem No.1*. A 16-bit
//! genotype is decoded into a value `x` in `[0, 2]`, and the two objectives
//! `f1(x) = x^2` and `f2(x) = (x - 2)^2` are minimized simultaneously.
//! ```no_run
//! use nsgaii::{
//!   allele::BooleanAllele,
//!   chromosome::Chromosome,
//!   objective::{
//!     FitnessCalculator,
//!     NormalizedGeneticCodeValue,
//!     ObjectiveFunction,
//!   },
//!   optimizer::{nsga2::Nsga2, Optimizer},
//!   Error,
//! };
//!
//! // decodes a 16-bit genetic code into a value between 0 and 2
//! let decoder =
//!   NormalizedGeneticCodeValue::new(0.0, 2f64.powi(16) - 1.0, 0.0, 2.0);
//! // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
//! let f1 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
//!   let x = decoder.fitness(c)?;
//!   Ok(x * x)
//! };
//! let f2 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
//!   let x = decoder.fitness(c)?;
//!   Ok((x - 2.0) * (x - 2.0))
//! };
//! // a convenient builder with compile time verification
//! // from `typed-builder` crate
//! let optimizer = Nsga2::builder()
//!   .population_size(100)
//!   .chromosome_length(16)
//!   .generations(50)
//!   .objectives(vec![
//!     Box::new(f1) as Box<dyn ObjectiveFunction<BooleanAllele>>,
//!     Box::new(f2) as Box<dyn ObjectiveFunction<BooleanAllele>>,
//!   ])
//!   .build();
//! // upon termination the optimizer returns the last population it bred,
//! // its first front approximating the Pareto set
//! let solutions = optimizer.optimize().unwrap();
//! # drop(solutions);
//! ```
//!
//! You can find a complete runnable version of this program in the *demos*
//! folder in the root of the project.
//!
//! # Common pitfalls
//!
//! - Closures are great and handy to use until they aren't. A subtle mistake
//!   can paint your code red and the error will appear far away from where
//!   you actually made a mistake. Since Rust does not allow you to annotate
//!   your variables with traits, always keep an eye on your closures or just
//!   implement traits for your own types instead.
//! - Objective values are written back with 4 decimal places of precision.
//!   If two chromosomes differ only beyond that precision, they are equal as
//!   far as dominance is concerned.
//! - Ranks and crowding distances are properties of one ranking pass over
//!   one population, not of a chromosome. Query them through the [`Ranking`]
//!   returned by [`rank`], and don't carry them across generations yourself -
//!   the optimizer already does.
//!
//! [`Nsga2`]: crate::optimizer::nsga2::Nsga2
//! [`Allele`]: crate::allele::Allele
//! [`Allele::as_bit`]: crate::allele::Allele::as_bit
//! [`BooleanAllele`]: crate::allele::BooleanAllele
//! [`Chromosome`]: crate::chromosome::Chromosome
//! [`ObjectiveFunction`]: crate::objective::ObjectiveFunction
//! [`NormalizedGeneticCodeValue`]: crate::objective::NormalizedGeneticCodeValue
//! [`GenotypeProducer`]: crate::producer::GenotypeProducer
//! [`RandomBitProducer`]: crate::producer::RandomBitProducer
//! [`PopulationProducer`]: crate::producer::PopulationProducer
//! [`DefaultPopulationProducer`]: crate::producer::DefaultPopulationProducer
//! [`ChildPopulationProducer`]: crate::producer::ChildPopulationProducer
//! [`TournamentChildProducer`]: crate::producer::TournamentChildProducer
//! [`Crossover`]: crate::crossover::Crossover
//! [`UniformCrossover`]: crate::crossover::UniformCrossover
//! [`Mutation`]: crate::mutation::Mutation
//! [`SinglePointMutation`]: crate::mutation::SinglePointMutation
//! [`ParticipantSelector`]: crate::selection::ParticipantSelector
//! [`CrowdedTournamentSelector`]: crate::selection::CrowdedTournamentSelector
//! [`GenerationObserver`]: crate::report::GenerationObserver
//! [`SilentObserver`]: crate::report::SilentObserver
//! [`Ranking`]: crate::ranking::Ranking
//! [`rank`]: crate::ranking::rank

#![warn(missing_docs)]

pub mod allele;
pub mod chromosome;
pub mod crossover;
mod error;
pub mod mutation;
pub mod objective;
pub mod optimizer;
pub mod population;
pub mod producer;
pub mod ranking;
pub mod report;
pub mod selection;

pub use error::Error;
