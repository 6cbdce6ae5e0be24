use std::fmt;

use super::ConversionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionStage {
    Staged,
    Translated,
    Launched,
    Completed,
    Classified,
    CleanedUp,
    CleanupFailed,
    Fault,
}

impl ConversionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStage::Staged => "staged",
            ConversionStage::Translated => "translated",
            ConversionStage::Launched => "launched",
            ConversionStage::Completed => "completed",
            ConversionStage::Classified => "classified",
            ConversionStage::CleanedUp => "cleaned_up",
            ConversionStage::CleanupFailed => "cleanup_failed",
            ConversionStage::Fault => "fault",
        }
    }
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured record emitted by each stage of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    pub conversion_id: ConversionId,
    pub stage: ConversionStage,
    pub detail: String,
}

impl StageEvent {
    pub fn new(conversion_id: ConversionId, stage: ConversionStage, detail: impl Into<String>) -> Self {
        Self {
            conversion_id,
            stage,
            detail: detail.into(),
        }
    }
}
