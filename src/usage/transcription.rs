use serde::Deserialize;
use serde_json::Value;

use crate::error::PricingError;

use super::TranscriptionUsage;

#[derive(Debug, Deserialize)]
struct RawTranscription {
    model: Option<String>,
    usage: Option<RawDuration>,
}

#[derive(Debug, Deserialize)]
struct RawDuration {
    seconds: f64,
}

pub(super) fn parse(value: &Value) -> Result<TranscriptionUsage, PricingError> {
    let raw = RawTranscription::deserialize(value)
        .map_err(|e| PricingError::unrecognized(format!("transcription payload: {e}")))?;
    let usage = raw
        .usage
        .ok_or_else(|| PricingError::unrecognized("transcription payload has no usage"))?;
    Ok(TranscriptionUsage {
        model: raw.model,
        seconds: usage.seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_seconds_are_accepted() {
        let value = json!({"model": "whisper-1", "usage": {"type": "duration", "seconds": 42}});
        let usage = parse(&value).unwrap();
        assert_eq!(usage.model.as_deref(), Some("whisper-1"));
        assert_eq!(usage.seconds, 42.0);
    }

    #[test]
    fn token_usage_is_not_a_duration() {
        let value = json!({"usage": {"input_tokens": 10}});
        assert!(matches!(
            parse(&value),
            Err(PricingError::UnrecognizedUsage { .. })
        ));
    }
}
