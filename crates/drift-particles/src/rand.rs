//! Lightweight xorshift32 PRNG
//!
//! Every stochastic decision in a run draws from one of these, so a seed
//! fully determines the particle sequence and the wind walk.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            // zero is a fixed point of xorshift
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Raw xorshift32 step
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next draw mapped to a non-negative value: the absolute value of the
    /// step read as a signed 32-bit integer.
    pub fn next_draw(&mut self) -> u32 {
        (self.next_u32() as i32).unsigned_abs()
    }

    /// Next draw reduced modulo `modulus`. A zero modulus yields 0.
    pub fn below(&mut self, modulus: u32) -> u32 {
        let draw = self.next_draw();
        if modulus == 0 {
            0
        } else {
            draw % modulus
        }
    }
}
