//! Generator trait.
//!
//! RULE: Every generator implements Generator.
//! Generators are single-shot: parameters in, fresh data out.
//! They never call one another and never keep state between calls.
//! The only randomness they see is the stream handed to generate().

use crate::rng::{GeneratorSlot, RngBank, SimRng};

/// The contract every generator must fulfill.
pub trait Generator {
    type Params;
    type Output;

    /// Stable slot; selects this generator's stream in the RngBank.
    const SLOT: GeneratorSlot;

    /// Small integer taken from the inputs that matter to this generator.
    /// Added to the base seed so that changing one of those inputs shifts
    /// the stream without touching other generators.
    fn seed_offset(_params: &Self::Params) -> i32 {
        0
    }

    fn generate(&self, params: &Self::Params, rng: &mut SimRng) -> Self::Output;

    /// Derive the stream from `bank` and run the generator.
    fn run(&self, bank: &RngBank, params: &Self::Params) -> Self::Output {
        let mut rng = bank.for_slot(Self::SLOT, Self::seed_offset(params));
        self.generate(params, &mut rng)
    }
}
