//! Baseline restoration
//!
//! After a volume change has been turned into a seek, the change itself is
//! undone: the host volume is forced back to the pre-gesture level. The
//! suppression window is opened before the write so the write's own echo
//! can never be classified as a new gesture. A write that fails produces no
//! echo, so the window is closed again.

use crate::classifier::VolumeClassifier;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use trackskip_core::{Result, Timestamp, VolumeSink};

/// Writes the baseline back through the host's volume sink
#[derive(Clone)]
pub struct BaselineRestorer {
    sink: Arc<dyn VolumeSink>,
}

impl BaselineRestorer {
    pub fn new(sink: Arc<dyn VolumeSink>) -> Self {
        Self { sink }
    }

    /// Restore `target`, suppressing samples until `now + window`
    ///
    /// The classifier's baseline becomes `target` only if the write went
    /// through.
    ///
    /// # Errors
    /// Returns the sink's error; the previous suppression deadline is put back
    pub fn restore(
        &self,
        classifier: &mut VolumeClassifier,
        target: u32,
        window: Duration,
        now: Timestamp,
    ) -> Result<()> {
        let until = now + window;
        let previous = classifier.suppress_until(until);

        if let Err(e) = self.sink.set_level(target) {
            warn!(target, "Failed to restore volume baseline: {}", e);
            classifier.reset_suppression(previous);
            return Err(e);
        }

        classifier.set_baseline(target);
        info!(target, suppress_until = %until, "Volume baseline restored");
        Ok(())
    }
}
