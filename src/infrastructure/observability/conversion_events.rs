use crate::application::ports::ConversionEvents;
use crate::domain::{ConversionStage, StageEvent};

use super::output_excerpt;

/// Writes stage records through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConversionEvents;

impl ConversionEvents for TracingConversionEvents {
    fn record(&self, event: &StageEvent) {
        let conversion_id = event.conversion_id.as_uuid();
        let stage = event.stage.as_str();
        match event.stage {
            ConversionStage::Fault => {
                tracing::error!(conversion_id = %conversion_id, stage, detail = %event.detail, "Conversion fault");
            }
            ConversionStage::CleanupFailed => {
                tracing::warn!(conversion_id = %conversion_id, stage, detail = %event.detail, "Failed to delete staged upload");
            }
            ConversionStage::Completed => {
                tracing::info!(
                    conversion_id = %conversion_id,
                    stage,
                    detail = %output_excerpt(&event.detail),
                    "Bridge process finished"
                );
            }
            ConversionStage::Classified => {
                tracing::info!(conversion_id = %conversion_id, stage, result = %event.detail, "Conversion classified");
            }
            _ => {
                tracing::debug!(conversion_id = %conversion_id, stage, detail = %event.detail, "Conversion stage");
            }
        }
    }
}
