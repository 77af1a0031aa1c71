use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single transcription segment delivered by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment id; interim and final versions of a segment share it
    pub id: String,

    /// Participant whose speech was transcribed
    pub participant_identity: String,

    /// Transcribed text
    pub text: String,

    /// Whether this is the final version of the segment
    pub is_final: bool,

    /// When this version was received
    pub received_at: DateTime<Utc>,
}

/// Ordered transcript feed
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Append a segment, or replace the earlier version with the same id in place.
    pub fn upsert(&mut self, segment: TranscriptSegment) {
        match self.segments.iter_mut().find(|s| s.id == segment.id) {
            Some(existing) => *existing = segment,
            None => self.segments.push(segment),
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, text: &str, is_final: bool) -> TranscriptSegment {
        TranscriptSegment {
            id: id.to_string(),
            participant_identity: "agent".to_string(),
            text: text.to_string(),
            is_final,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_final_replaces_interim_in_place() {
        let mut transcript = Transcript::default();
        transcript.upsert(segment("a", "namas", false));
        transcript.upsert(segment("b", "hello", true));
        transcript.upsert(segment("a", "namaste", true));

        let texts: Vec<_> = transcript.segments().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["namaste", "hello"]);
        assert!(transcript.segments()[0].is_final);
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::default();
        transcript.upsert(segment("a", "x", true));
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
