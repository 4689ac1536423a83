//! Genotype units and built-in allele types.

use std::fmt::Debug;

/// An opaque unit of genetic information.
///
/// A chromosome is an ordered sequence of alleles. The optimizer itself never
/// looks inside an allele: it only clones them around during crossover and
/// mutation, so any cheaply clonable type with value equality qualifies.
///
/// Operators that are specialized to bit encoded genotypes - such as
/// [`SinglePointMutation`] or [`NormalizedGeneticCodeValue`] - probe alleles
/// through [`as_bit`] and [`from_bit`]. Types that are not bit based keep the
/// default implementations, and such operators reject them with
/// [`Error::RepresentationMismatch`] instead of silently misreading their
/// contents.
///
/// [`SinglePointMutation`]: crate::mutation::SinglePointMutation
/// [`NormalizedGeneticCodeValue`]: crate::objective::NormalizedGeneticCodeValue
/// [`as_bit`]: Allele::as_bit
/// [`from_bit`]: Allele::from_bit
/// [`Error::RepresentationMismatch`]: crate::Error::RepresentationMismatch
pub trait Allele: Clone + PartialEq + Debug + Send + Sync + 'static {
  /// Returns the bit this allele encodes, or `None` if this representation
  /// is not bit based.
  fn as_bit(&self) -> Option<bool> {
    None
  }

  /// Builds an allele from a single bit, or returns `None` if this
  /// representation is not bit based.
  fn from_bit(bit: bool) -> Option<Self> {
    let _ = bit;
    None
  }
}

/// A single bit of genetic code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BooleanAllele(pub bool);

impl Allele for BooleanAllele {
  fn as_bit(&self) -> Option<bool> {
    Some(self.0)
  }

  fn from_bit(bit: bool) -> Option<Self> {
    Some(BooleanAllele(bit))
  }
}

/// A real valued gene.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ValueAllele(pub f64);

impl Allele for ValueAllele {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_boolean_allele_bit_view() {
    assert_eq!(BooleanAllele(true).as_bit(), Some(true));
    assert_eq!(BooleanAllele(false).as_bit(), Some(false));
    assert_eq!(BooleanAllele::from_bit(true), Some(BooleanAllele(true)));
  }

  #[test]
  fn test_value_allele_has_no_bit_view() {
    assert_eq!(ValueAllele(0.5).as_bit(), None);
    assert_eq!(ValueAllele::from_bit(true), None);
  }
}
