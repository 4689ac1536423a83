use nsgaii::{
  allele::BooleanAllele,
  chromosome::Chromosome,
  objective::{
    FitnessCalculator,
    NormalizedGeneticCodeValue,
    ObjectiveFunction,
  },
  optimizer::{nsga2::Nsga2, Optimizer},
  ranking,
  report::TracingReporter,
  Error,
};

fn main() {
  // log generation progress to stderr. raise to DEBUG to see every child
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .with_writer(std::io::stderr)
    .init();

  // chromosome length in bits; the genetic code is decoded into `[0, 2]`
  const BITS: usize = 16;
  let decoder = NormalizedGeneticCodeValue::new(
    0.0,
    2f64.powi(BITS as i32) - 1.0,
    0.0,
    2.0,
  );

  // objective function f1(x) = x^2
  let f1 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
    let x = decoder.fitness(c)?;
    Ok(x * x)
  };
  // and another objective function f2(x) = (x - 2)^2
  let f2 = move |c: &Chromosome<BooleanAllele>| -> Result<f64, Error> {
    let x = decoder.fitness(c)?;
    Ok((x - 2.0) * (x - 2.0))
  };

  let optimizer = Nsga2::builder()
    .population_size(100)
    .chromosome_length(BITS)
    .generations(50)
    .objectives(vec![
      Box::new(f1) as Box<dyn ObjectiveFunction<BooleanAllele>>,
      Box::new(f2) as Box<dyn ObjectiveFunction<BooleanAllele>>,
    ])
    .fitness_calculator(Box::new(decoder))
    .observer(Box::new(TracingReporter()))
    .build();
  let mut solutions = optimizer.optimize().unwrap();

  // rank once more to find the first front of the final population
  let final_ranking = ranking::rank(&mut solutions).unwrap();
  let mut front: Vec<_> = final_ranking.fronts()[0]
    .iter()
    .map(|&i| {
      let chromosome = solutions.get(i);
      let x = decoder.fitness(chromosome).unwrap();
      (x, chromosome.objective_values().to_vec())
    })
    .collect();
  front.sort_by(|a, b| a.0.total_cmp(&b.0));

  // Pareto optimal solutions of Schaffer's problem No.1 lie in 0 <= x <= 2
  println!("   x   |  f1(x) |  f2(x)");
  for (x, values) in front {
    println!("{x:.4} | {:.4} | {:.4}", values[0], values[1]);
  }
}
