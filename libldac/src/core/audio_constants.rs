/// Maximum positive value for 16-bit signed integer (2^15 - 1)
pub const I16_MAX_F32: f32 = 32767.0;

/// Minimum value for 16-bit signed integer (-2^15)
pub const I16_MIN_F32: f32 = -32768.0;

/// int→float scale for 16-bit input (1/32768), keeps -32768 at exactly -1.0
pub const I16_TO_F32_SCALE: f32 = 1.0 / 32768.0;

/// int→float scale for packed 24-bit input (1/2^23)
pub const I24_TO_F32_SCALE: f32 = 1.0 / 8_388_608.0;

/// int→float scale for 32-bit input (1/2^31)
pub const I32_TO_F32_SCALE: f32 = 1.0 / 2_147_483_648.0;

/// Convert f32 sample to i16
#[inline]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * I16_MAX_F32).clamp(I16_MIN_F32, I16_MAX_F32) as i16
}

/// Convert i16 sample to f32
#[inline]
pub fn i16_to_f32(sample: i16) -> f32 {
    sample as f32 * I16_TO_F32_SCALE
}

/// Convert a sign-extended 24-bit sample to f32
#[inline]
pub fn i24_to_f32(sample: i32) -> f32 {
    sample as f32 * I24_TO_F32_SCALE
}

/// Convert i32 sample to f32
#[inline]
pub fn i32_to_f32(sample: i32) -> f32 {
    sample as f32 * I32_TO_F32_SCALE
}
