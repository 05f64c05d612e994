use crate::config::DesignParams;
use fastrand::Rng;
use std::f64::consts::PI;
use tracing::warn;

/// Integer jitter drawn from N(0, spread) and rejected until it falls
/// inside [-limit, limit].
#[derive(Debug, Clone, Copy)]
pub struct NoiseSampler {
    pub spread: f64,
    pub limit: i32,
    pub max_draws: usize,
}

impl From<&DesignParams> for NoiseSampler {
    fn from(d: &DesignParams) -> Self {
        Self {
            spread: d.noise_spread,
            limit: d.noise_upper_limit,
            max_draws: d.noise_max_draws,
        }
    }
}

impl NoiseSampler {
    pub fn sample(&self, rng: &mut Rng) -> i32 {
        for _ in 0..self.max_draws {
            // Truncates toward zero before the bound check.
            let draw = (sample_standard_normal(rng) * self.spread) as i32;
            if draw.abs() <= self.limit {
                return draw;
            }
        }
        warn!(
            "Noise sampler hit its cap of {} draws (spread {}, limit {}). Using 0.",
            self.max_draws, self.spread, self.limit
        );
        0
    }
}

/// Box-Muller transform over the uniform generator.
pub fn sample_standard_normal(rng: &mut Rng) -> f64 {
    let u1 = rng.f64().max(f64::MIN_POSITIVE);
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
