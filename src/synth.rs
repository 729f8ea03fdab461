//! Random program synthesis over the [`crate::grammar`] vocabulary.
//!
//! A [`Synthesizer`] owns its random generator, so callers choose between a
//! process-seeded source ([`Synthesizer::from_entropy`]) and a reproducible one
//! ([`Synthesizer::from_seed`]). Two synthesizers built from the same seed
//! produce the same lines in the same order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::iter;

use crate::grammar::{InstructionLine, Opcode};

/// Generates grammar-valid instruction lines from an injected RNG.
#[derive(Debug, Clone)]
pub struct Synthesizer<R = StdRng> {
    rng: R,
}

impl Synthesizer<StdRng> {
    /// Seeded from the operating system; content differs between runs.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic for a given `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn new(rng: R) -> Self {
        Synthesizer { rng }
    }

    /// Produce `count` body lines in generation order.
    pub fn synthesize(&mut self, count: usize) -> Vec<InstructionLine> {
        self.lines(count).collect()
    }

    /// Lazily yield `count` body lines; nothing is buffered, so the corpus
    /// writer can stream a body of any size.
    pub fn lines(&mut self, count: usize) -> impl Iterator<Item = InstructionLine> + '_ {
        iter::repeat_with(move || self.next_line()).take(count)
    }

    /// Sample one opcode uniformly, then fill its operands.
    ///
    /// Registers are drawn with replacement, so a line such as
    /// `add r4 with r4 to r4` is as likely as any other.
    pub fn next_line(&mut self) -> InstructionLine {
        let opcode = Opcode::ALL[self.rng.gen_range(0..Opcode::ALL.len())];
        match opcode {
            Opcode::Arith(op) => InstructionLine::Arith {
                op,
                lhs: self.rng.gen(),
                rhs: self.rng.gen(),
                dst: self.rng.gen(),
            },
            Opcode::Move => InstructionLine::Move {
                src: self.rng.gen(),
                dst: self.rng.gen(),
            },
            Opcode::Load => InstructionLine::Load {
                addr: self.rng.gen(),
                dst: self.rng.gen(),
            },
            Opcode::Store => InstructionLine::Store {
                src: self.rng.gen(),
                addr: self.rng.gen(),
            },
        }
    }
}
