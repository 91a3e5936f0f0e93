use crate::core::{I16_MAX_F32, I16_MIN_F32, NUM_COEFFICIENTS, WINDOW_SAMPLES};

/// Upper bound on |X[k]| for input in [-1, 1]: Σ|x·w| ≤ 256
pub const FULL_SCALE: f32 = WINDOW_SAMPLES as f32;

/// Largest block gain, 2^15
pub const MAX_SHIFT: u8 = 15;

/// One channel's coefficients in block floating point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledBlock {
    /// Block gain exponent: values were scaled by 2^shift before rounding
    pub shift: u8,
    /// Scaled coefficients
    pub values: [i16; NUM_COEFFICIENTS],
}

impl ScaledBlock {
    /// High byte of each value, the part every quality mode carries
    pub fn coarse(&self, k: usize) -> u8 {
        (self.values[k] >> 8) as u8
    }

    /// Low byte of each value, sent while payload budget remains
    pub fn fine(&self, k: usize) -> u8 {
        self.values[k] as u8
    }
}

/// Largest shift s in 0..=15 with peak·2^s ≤ FULL_SCALE.
///
/// NaN never wins `f32::max`, and a peak above FULL_SCALE (or infinite)
/// yields 0, so every input has exactly one answer.
pub fn block_shift(coeffs: &[f32]) -> u8 {
    let peak = coeffs.iter().fold(0.0f32, |m, &c| m.max(c.abs()));

    (0..=MAX_SHIFT)
        .rev()
        .find(|&s| peak * (1u32 << s) as f32 <= FULL_SCALE)
        .unwrap_or(0)
}

/// Scale and clip one channel's coefficients into i16.
///
/// q = sat_i16(round(c / FULL_SCALE · 2^shift · 32767)); `as` saturates and
/// maps NaN to 0, so no input can overflow.
pub fn quantize(coeffs: &[f32; NUM_COEFFICIENTS]) -> ScaledBlock {
    let shift = block_shift(coeffs);
    let gain = (1u32 << shift) as f32 * I16_MAX_F32 / FULL_SCALE;

    let mut values = [0i16; NUM_COEFFICIENTS];
    for (q, &c) in values.iter_mut().zip(coeffs.iter()) {
        *q = (c * gain).round().clamp(I16_MIN_F32, I16_MAX_F32) as i16;
    }

    ScaledBlock { shift, values }
}

/// Payload byte stream for a block of channels.
///
/// Layout: one shift byte per channel, then the coarse byte of every
/// coefficient (bins ascending, channels interleaved per bin), then the fine
/// bytes in the same order, then zeros forever. The packer takes exactly as
/// many bytes as the quality mode allows.
pub fn payload_stream(blocks: &[ScaledBlock]) -> impl Iterator<Item = u8> + '_ {
    let shifts = blocks.iter().map(|b| b.shift);
    let coarse = (0..NUM_COEFFICIENTS).flat_map(move |k| blocks.iter().map(move |b| b.coarse(k)));
    let fine = (0..NUM_COEFFICIENTS).flat_map(move |k| blocks.iter().map(move |b| b.fine(k)));

    shifts.chain(coarse).chain(fine).chain(std::iter::repeat(0))
}
