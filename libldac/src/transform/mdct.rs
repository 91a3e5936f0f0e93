// Lapped block transform: 256 windowed samples in, 128 coefficients out.
//
// X[k] = Σ x[n] * w[n] * cos(π/128 * (n + 0.5 + 64) * (k + 0.5))
//
// Splitting the cosine argument gives
//   θ(n, k) = 2π·n·k/256 + π·n/256 + π·n0·(k + 0.5)/128,  n0 = 64.5
// so X[k] = Re( post[k] · FFT256(x·w·pre)[k] ) with
//   pre[n]  = e^(-iπn/256)
//   post[k] = e^(-iπ·n0·(k + 0.5)/128)

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

use crate::core::{NUM_COEFFICIENTS, WINDOW_SAMPLES};

/// Phase offset of the MDCT basis: 0.5 + N/2 with N = 128
const PHASE_OFFSET: f64 = 0.5 + (NUM_COEFFICIENTS / 2) as f64;

/// Process-wide transform tables
///
/// Built once on first use and never mutated afterwards; every session reads
/// the same instance.
pub struct MdctTables {
    /// Sine analysis window w[n] = sin(π(n+0.5)/256)
    window: [f32; WINDOW_SAMPLES],
    /// Pre-FFT twiddles e^(-iπn/256)
    pre: Vec<Complex<f32>>,
    /// Post-FFT twiddles e^(-iπ·n0·(k+0.5)/128)
    post: Vec<Complex<f32>>,
    /// Forward FFT, length 256
    fft: Arc<dyn Fft<f32>>,
}

static TABLES: OnceLock<MdctTables> = OnceLock::new();

impl MdctTables {
    fn build() -> Self {
        let n = WINDOW_SAMPLES as f64;

        let mut window = [0.0f32; WINDOW_SAMPLES];
        for (i, w) in window.iter_mut().enumerate() {
            *w = (PI / n * (i as f64 + 0.5)).sin() as f32;
        }

        let pre = (0..WINDOW_SAMPLES)
            .map(|i| {
                let theta = -PI * i as f64 / n;
                Complex::new(theta.cos() as f32, theta.sin() as f32)
            })
            .collect();

        let post = (0..NUM_COEFFICIENTS)
            .map(|k| {
                let theta = -PI * PHASE_OFFSET * (k as f64 + 0.5) / NUM_COEFFICIENTS as f64;
                Complex::new(theta.cos() as f32, theta.sin() as f32)
            })
            .collect();

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(WINDOW_SAMPLES);

        tracing::debug!("mdct tables initialized ({} point fft)", WINDOW_SAMPLES);

        Self {
            window,
            pre,
            post,
            fft,
        }
    }

    /// Shared tables, initializing them on the first call
    pub fn get() -> &'static MdctTables {
        TABLES.get_or_init(Self::build)
    }

    /// The analysis window
    pub fn window(&self) -> &[f32; WINDOW_SAMPLES] {
        &self.window
    }

    /// Forward transform of one 256-sample channel window
    pub fn forward(&self, samples: &[f32; WINDOW_SAMPLES]) -> [f32; NUM_COEFFICIENTS] {
        // Apply window and pre-rotation
        let mut z: Vec<Complex<f32>> = samples
            .iter()
            .zip(self.window.iter())
            .zip(self.pre.iter())
            .map(|((&s, &w), &t)| t * (s * w))
            .collect();

        self.fft.process(&mut z);

        // Post-rotation, keep the real part of the first N/2 bins
        let mut output = [0.0f32; NUM_COEFFICIENTS];
        for (k, out) in output.iter_mut().enumerate() {
            *out = (z[k] * self.post[k]).re;
        }

        output
    }
}

/// Force table construction. Idempotent and thread-safe.
pub fn init_tables() {
    MdctTables::get();
}

/// The shared analysis window
pub fn analysis_window() -> &'static [f32; WINDOW_SAMPLES] {
    MdctTables::get().window()
}

/// Forward MDCT of one 256-sample window: stateless, pure
pub fn forward(samples: &[f32; WINDOW_SAMPLES]) -> [f32; NUM_COEFFICIENTS] {
    MdctTables::get().forward(samples)
}
