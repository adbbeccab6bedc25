use rand::seq::SliceRandom;
use rand::Rng;

use crate::render::{Block, Region, RenderTarget};

pub const FACTS: [&str; 5] = [
    "I have 2 siblings.",
    "My favorite color is blue.",
    "I enjoy outdoor activities.",
    "I skipped a grade.",
    "I was born in Massachusetts.",
];

pub fn random_fact<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FACTS.choose(rng).copied().unwrap_or(FACTS[0])
}

/// Picks a fact and replaces the fact region with it.
pub fn show_random_fact<R: Rng + ?Sized, T: RenderTarget + ?Sized>(rng: &mut R, target: &mut T) -> &'static str {
    let fact = random_fact(rng);
    target.replace_children(Region::Fact, vec![Block::Text(fact.to_string())]);
    fact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryTarget;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn picks_every_fact_eventually() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..200).map(|_| random_fact(&mut rng)).collect();
        assert_eq!(seen.len(), FACTS.len());
    }

    #[test]
    fn renders_single_fact() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut target = MemoryTarget::new();
        let fact = show_random_fact(&mut rng, &mut target);
        assert_eq!(target.blocks(Region::Fact), &[Block::Text(fact.to_string())]);
    }
}
