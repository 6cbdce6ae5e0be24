use crate::domain::StageEvent;

/// Sink for the structured records each conversion stage emits.
pub trait ConversionEvents: Send + Sync {
    fn record(&self, event: &StageEvent);
}
