//! javascript bindings for the encoder session

use wasm_bindgen::prelude::*;

use crate::core::{ErrorCode, LdacError, QualityMode, SamplingFrequency};
use crate::session::EncoderSession;

/// turn an encoder error into a js Error carrying a numeric `code`
fn to_js_err(e: &LdacError) -> JsValue {
    let err = js_sys::Error::new(&e.to_string());
    // setting a property on a fresh Error object can't fail
    let _ = js_sys::Reflect::set(&err, &"code".into(), &e.code().as_i32().into());
    err.into()
}

/// Stateful block encoder for javascript callers
///
/// ```js
/// const enc = new LdacEncoder(679, 1, 0, 1, 48000);
/// const frame = enc.encode(pcmBlock); // 512 bytes of s16 stereo
/// enc.destroy();
/// ```
#[wasm_bindgen]
pub struct LdacEncoder {
    session: Option<EncoderSession>,
}

#[wasm_bindgen]
impl LdacEncoder {
    /// Create and configure an encoder
    ///
    /// # Arguments
    /// * `mtu` - transport MTU in bytes (679 is typical)
    /// * `eqmid` - 0 = high, 1 = standard, 2 = mobile
    /// * `channel_mode` - 0 = stereo, 1 = dual, 2 = mono
    /// * `fmt` - 1 = s16, 2 = s24, 3 = s32, 4 = f32
    /// * `sampling_freq` - 44100, 48000, 88200 or 96000
    #[wasm_bindgen(constructor)]
    pub fn new(
        mtu: i32,
        eqmid: i32,
        channel_mode: i32,
        fmt: i32,
        sampling_freq: i32,
    ) -> Result<LdacEncoder, JsValue> {
        console_error_panic_hook::set_once();

        let mut session = EncoderSession::new();
        session
            .configure_raw(mtu, eqmid, channel_mode, fmt, sampling_freq)
            .map_err(|e| to_js_err(&e))?;

        Ok(Self {
            session: Some(session),
        })
    }

    /// Encode one block of interleaved PCM into a frame
    ///
    /// An empty buffer yields an empty frame and leaves the session alone.
    #[wasm_bindgen]
    pub fn encode(&mut self, buffer: &[u8]) -> Result<Vec<u8>, JsValue> {
        let session = self.session_mut()?;
        if buffer.is_empty() {
            return Ok(Vec::new());
        }

        session
            .encode_frame(buffer)
            .map(|frame| frame.into_bytes())
            .map_err(|e| to_js_err(&e))
    }

    /// Bitrate in bits per second
    #[wasm_bindgen(js_name = getBitrate)]
    pub fn get_bitrate(&self) -> Result<u32, JsValue> {
        Ok(self.session_ref()?.bitrate())
    }

    #[wasm_bindgen(js_name = getSamplingFrequency)]
    pub fn get_sampling_frequency(&self) -> Result<u32, JsValue> {
        Ok(self.session_ref()?.sampling_frequency())
    }

    /// Code of the last failed operation, 0 when none
    #[wasm_bindgen(js_name = getLastErrorCode)]
    pub fn get_last_error_code(&self) -> i32 {
        match &self.session {
            Some(session) => session.last_error().as_i32(),
            None => ErrorCode::Fatal.as_i32(),
        }
    }

    /// Active configuration as a plain object
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        match self.session_ref()?.config() {
            Some(config) => serde_wasm_bindgen::to_value(config)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::NULL),
        }
    }

    /// PCM bytes one `encode` call consumes
    #[wasm_bindgen(js_name = blockBytes)]
    pub fn block_bytes(&self) -> Result<usize, JsValue> {
        Ok(self.session_ref()?.block_bytes().unwrap_or(0))
    }

    /// Release the session; later calls fail with a fatal error
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        if let Some(session) = self.session.take() {
            session.destroy();
        }
    }
}

impl LdacEncoder {
    fn session_ref(&self) -> Result<&EncoderSession, JsValue> {
        self.session
            .as_ref()
            .ok_or_else(|| to_js_err(&LdacError::SessionDestroyed))
    }

    fn session_mut(&mut self) -> Result<&mut EncoderSession, JsValue> {
        self.session
            .as_mut()
            .ok_or_else(|| to_js_err(&LdacError::SessionDestroyed))
    }
}

/// Bitrate a quality mode produces at a sampling frequency, 0 if unsupported
#[wasm_bindgen(js_name = bitrateFor)]
pub fn bitrate_for(eqmid: i32, sampling_freq: u32) -> u32 {
    match (
        QualityMode::try_from(eqmid),
        SamplingFrequency::from_hz(sampling_freq),
    ) {
        (Ok(quality), Ok(fs)) => quality.bitrate(fs),
        _ => 0,
    }
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
