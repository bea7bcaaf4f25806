//! Entropy source for token identifiers (`jti`)

use crate::error::{Error, Result};

use aws_lc_rs::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

/// A source of random bytes
pub trait RandomSource {
    /// Fill `dest` entirely with random bytes
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// Cryptographically secure randomness from the operating system
#[derive(Debug, Clone)]
pub struct SystemRandomSource {
    rng: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill(dest).map_err(|_| Error::EntropyUnavailable)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Arc<R> {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}
