//! Mutation operators.

use rand::Rng;

use crate::{allele::Allele, chromosome::Chromosome, error::Error};

/// An operator that derives a new chromosome from a single one by perturbing
/// its genes. Never mutates the input in place.
///
/// Implemented by any closure of type
/// `Fn(&Chromosome<A>) -> Result<Chromosome<A>, Error>`.
///
/// **Note that you always can implement this trait instead of using
/// closures.**
pub trait Mutation<A: Allele>: Send + Sync {
  /// Produces a mutated copy of given chromosome.
  fn perform(&self, chromosome: &Chromosome<A>)
    -> Result<Chromosome<A>, Error>;
}

impl<A, F> Mutation<A> for F
where
  A: Allele,
  F: Fn(&Chromosome<A>) -> Result<Chromosome<A>, Error> + Send + Sync,
{
  fn perform(
    &self,
    chromosome: &Chromosome<A>,
  ) -> Result<Chromosome<A>, Error> {
    self(chromosome)
  }
}

/// Bit flip mutation: every gene of a bit encoded chromosome is flipped
/// independently with the mutation probability. The default probability is
/// `0.03`.
///
/// Rejects genotypes that are not bit based with
/// [`Error::RepresentationMismatch`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SinglePointMutation {
  mutation_probability: f32,
}

impl SinglePointMutation {
  /// Creates a mutation flipping each gene with given probability.
  pub fn new(mutation_probability: f32) -> Self {
    Self {
      mutation_probability,
    }
  }
}

impl Default for SinglePointMutation {
  fn default() -> Self {
    Self::new(0.03)
  }
}

impl<A: Allele> Mutation<A> for SinglePointMutation {
  fn perform(
    &self,
    chromosome: &Chromosome<A>,
  ) -> Result<Chromosome<A>, Error> {
    let mut rng = rand::thread_rng();
    let genetic_code = chromosome
      .genetic_code()
      .iter()
      .map(|allele| {
        let bit = allele.as_bit().ok_or(Error::RepresentationMismatch {
          operator: "SinglePointMutation",
        })?;
        let mutated = if rng.gen::<f32>() <= self.mutation_probability {
          !bit
        } else {
          bit
        };
        A::from_bit(mutated).ok_or(Error::RepresentationMismatch {
          operator: "SinglePointMutation",
        })
      })
      .collect::<Result<Vec<A>, Error>>()?;
    Ok(Chromosome::new(genetic_code))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::allele::{BooleanAllele, ValueAllele};

  fn bits(bits: &[bool]) -> Chromosome<BooleanAllele> {
    Chromosome::new(bits.iter().map(|b| BooleanAllele(*b)).collect())
  }

  #[test]
  fn test_zeroed_probability_copies_the_genotype() {
    let chromosome = bits(&[true, false, true, true]);
    let mutation = SinglePointMutation::new(0.0);
    let mutated = mutation.perform(&chromosome).unwrap();
    assert_eq!(mutated.genetic_code(), chromosome.genetic_code());
  }

  #[test]
  fn test_certain_probability_flips_every_gene() {
    let chromosome = bits(&[true, false, true, false]);
    let mutation = SinglePointMutation::new(1.0);
    let mutated = mutation.perform(&chromosome).unwrap();
    let expected = bits(&[false, true, false, true]);
    assert_eq!(mutated.genetic_code(), expected.genetic_code());
  }

  #[test]
  fn test_input_chromosome_is_untouched() {
    let chromosome = bits(&[true, true]);
    let mutation = SinglePointMutation::new(1.0);
    let _ = mutation.perform(&chromosome).unwrap();
    assert_eq!(chromosome.genetic_code(), bits(&[true, true]).genetic_code());
  }

  #[test]
  fn test_incompatible_representation_is_rejected() {
    let chromosome = Chromosome::new(vec![ValueAllele(0.1)]);
    let mutation = SinglePointMutation::default();
    assert!(matches!(
      mutation.perform(&chromosome),
      Err(Error::RepresentationMismatch { .. })
    ));
  }

  #[test]
  fn test_mutation_from_closure() {
    let identity = |c: &Chromosome<ValueAllele>| -> Result<_, Error> {
      Ok(c.clone())
    };
    let chromosome = Chromosome::new(vec![ValueAllele(0.1)]);
    let mutated = identity.perform(&chromosome).unwrap();
    assert_eq!(mutated.genetic_code(), chromosome.genetic_code());
  }
}
