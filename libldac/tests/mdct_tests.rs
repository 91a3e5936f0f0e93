#[cfg(test)]
mod mdct_tests {
    use libldac_bt::transform::{analysis_window, forward, quantize, FULL_SCALE, MAX_SHIFT};
    use std::f32::consts::PI;

    const N: usize = 128;
    const N2: usize = 256;

    fn direct_mdct(samples: &[f32]) -> Vec<f32> {
        let window = analysis_window();
        (0..N)
            .map(|k| {
                let mut sum = 0.0f64;
                for i in 0..N2 {
                    let angle = (std::f64::consts::PI / N as f64)
                        * (i as f64 + 0.5 + (N / 2) as f64)
                        * (k as f64 + 0.5);
                    sum += (samples[i] * window[i]) as f64 * angle.cos();
                }
                sum as f32
            })
            .collect()
    }

    fn window_of(signal: &[f32]) -> [f32; N2] {
        let mut buf = [0.0f32; N2];
        buf.copy_from_slice(signal);
        buf
    }

    #[test]
    fn test_window_is_symmetric_sine() {
        let window = analysis_window();
        for i in 0..N {
            assert!((window[i] - window[N2 - 1 - i]).abs() < 1e-6);
        }
        assert!((window[0] - (PI / 512.0).sin()).abs() < 1e-6);
        for i in 0..N {
            let sum = window[i].powi(2) + window[i + N].powi(2);
            assert!((sum - 1.0).abs() < 1e-4, "P-B violated at {}: {}", i, sum);
        }
    }

    #[test]
    fn test_fast_transform_matches_direct_formula() {
        let signal: Vec<f32> = (0..N2)
            .map(|i| {
                let t = i as f32;
                0.6 * (t * 0.07).sin() + 0.3 * (t * 0.91).cos() - 0.05 * ((i % 7) as f32 - 3.0)
            })
            .collect();

        let fast = forward(&window_of(&signal));
        let direct = direct_mdct(&signal);

        let peak = direct.iter().fold(0.0f32, |m, &c| m.max(c.abs()));
        for k in 0..N {
            let err = (fast[k] - direct[k]).abs();
            assert!(
                err <= 1e-3 * peak.max(1.0),
                "bin {}: fast {} direct {}",
                k,
                fast[k],
                direct[k]
            );
        }
    }

    #[test]
    fn test_impulse_matches_direct_formula() {
        for pos in [0, 63, 128, 200, 255] {
            let mut signal = vec![0.0f32; N2];
            signal[pos] = 1.0;
            let fast = forward(&window_of(&signal));
            let direct = direct_mdct(&signal);
            for k in 0..N {
                assert!((fast[k] - direct[k]).abs() < 1e-4, "pos {} bin {}", pos, k);
            }
        }
    }

    #[test]
    fn test_perfect_reconstruction() {
        let window = analysis_window();

        // Inverse MDCT, windowed, 2/N scaling for the sine window
        let mdct_inverse = |coeffs: &[f32]| -> Vec<f32> {
            let mut samples = vec![0.0f32; N2];
            let scale = 2.0 / (N as f32);
            for i in 0..N2 {
                let mut sum = 0.0f32;
                for (k, &coeff) in coeffs.iter().enumerate() {
                    let angle = (PI / (N as f32))
                        * ((i as f32) + 0.5 + (N as f32) / 2.0)
                        * ((k as f32) + 0.5);
                    sum += coeff * angle.cos();
                }
                samples[i] = sum * scale * window[i];
            }
            samples
        };

        let freq = 440.0;
        let sample_rate = 44100.0;
        let total_samples = N2 * 4;
        let signal: Vec<f32> = (0..total_samples)
            .map(|i| ((2.0 * PI * freq * (i as f32)) / sample_rate).sin())
            .collect();

        let mut output = vec![0.0f32; total_samples];
        for start in (0..=total_samples - N2).step_by(N) {
            let coeffs = forward(&window_of(&signal[start..start + N2]));
            let reconstructed = mdct_inverse(&coeffs);
            for i in 0..N2 {
                output[start + i] += reconstructed[i];
            }
        }

        // first and last half-windows only see one transform
        let mut max_error = 0.0f32;
        for i in N..total_samples - N {
            max_error = max_error.max((output[i] - signal[i]).abs());
        }
        assert!(max_error < 1e-3, "max reconstruction error {}", max_error);
    }

    #[test]
    fn test_full_scale_input_stays_within_bound() {
        // worst case: every windowed sample aligned with one basis vector
        let k = 17;
        let signal: Vec<f32> = (0..N2)
            .map(|i| {
                let angle = (PI / N as f32) * (i as f32 + 0.5 + 64.0) * (k as f32 + 0.5);
                angle.cos().signum()
            })
            .collect();

        let coeffs = forward(&window_of(&signal));
        assert!(coeffs.iter().all(|c| c.abs() <= FULL_SCALE));

        // the gain puts the peak in the top half of the i16 range
        let scaled = quantize(&coeffs);
        assert!(scaled.shift < MAX_SHIFT);
        let peak = scaled.values.iter().map(|v| v.unsigned_abs()).max().unwrap();
        assert!(peak > 16000, "peak {}", peak);
    }
}
