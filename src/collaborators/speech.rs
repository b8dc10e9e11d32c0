//! Contract for the external text-to-speech service
//!
//! Speech is best effort. A failed synthesis is logged and forgotten,
//! it never blocks or fails a store operation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("speech service unavailable: {0}")]
    Unavailable(String),

    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(String),
}

/// Narrow contract of the speech collaborator
pub trait SpeechSynthesizer {
    fn speak(
        &self,
        text: &str,
        voice_hint: Option<&str>,
        rate: Option<f32>,
    ) -> Result<(), SpeechError>;
}

/// Fire-and-forget wrapper: failures are logged at warn level and
/// swallowed.
pub fn speak_best_effort(
    synth: &dyn SpeechSynthesizer,
    text: &str,
    voice_hint: Option<&str>,
    rate: Option<f32>,
) {
    if let Err(e) = synth.speak(text, voice_hint, rate) {
        log::warn!("speech synthesis failed for {:?}: {}", text, e);
    }
}

/// Default synthesizer used when no real speech backend is wired in.
/// Logs the request and reports success.
pub struct LoggingSpeech;

impl SpeechSynthesizer for LoggingSpeech {
    fn speak(
        &self,
        text: &str,
        voice_hint: Option<&str>,
        _rate: Option<f32>,
    ) -> Result<(), SpeechError> {
        log::debug!("speak: {:?} (voice: {:?})", text, voice_hint);
        Ok(())
    }
}
