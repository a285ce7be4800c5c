//! Volume-change classification
//!
//! Owns the volume baseline (the last level considered settled) and turns
//! each volume sample into a verdict. Samples are compared against the
//! baseline; a genuine change is attributed to the phone or, failing that,
//! treated as a headset gesture according to the trigger mode.
//!
//! The classifier never talks to the host. A `VolumeVerdict::Seek` is a
//! command for the caller, which reports back with `accept` (the change
//! stands) or via the restorer (`suppress_until` + `set_baseline`).

use crate::correlator::PhoneKeyCorrelator;
use crate::double_press::{DoublePressDetector, PendingPress, PressOutcome};
use tracing::debug;
use trackskip_core::{Direction, SeekTriggerMode, Timestamp, Timings, VolumeSample};

/// What a volume sample means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeVerdict {
    /// Inside the post-restore suppression window; baseline untouched
    Suppressed,

    /// First sample ever seen; recorded as the baseline
    Baseline,

    /// Same level as the baseline
    Unchanged,

    /// Attributed to the phone's own volume keys; accepted as the new baseline
    PhoneOriginated { direction: Direction },

    /// Opened a double-press sequence; accepted as the new baseline
    Pending { direction: Direction },

    /// A seek gesture. On success restore `restore_to`; otherwise accept `level`
    Seek {
        direction: Direction,
        restore_to: u32,
        level: u32,
    },
}

/// Baseline, suppression window and the volume path's double-press detector
#[derive(Debug, Clone, Default)]
pub struct VolumeClassifier {
    baseline: Option<u32>,
    suppress_until: Option<Timestamp>,
    presses: DoublePressDetector<u32>,
}

impl VolumeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known level instead of waiting for the first sample
    pub fn with_baseline(level: u32) -> Self {
        Self {
            baseline: Some(level),
            ..Self::default()
        }
    }

    /// Classify one sample
    ///
    /// Only meaningful in the volume-observing modes; any other mode yields
    /// `Unchanged` without touching state.
    pub fn observe(
        &mut self,
        sample: VolumeSample,
        mode: SeekTriggerMode,
        timings: &Timings,
        phone_keys: &PhoneKeyCorrelator,
    ) -> VolumeVerdict {
        if self.is_suppressed(sample.timestamp) {
            debug!(level = sample.level, at = %sample.timestamp, "Volume sample suppressed");
            return VolumeVerdict::Suppressed;
        }

        let Some(previous) = self.baseline else {
            self.baseline = Some(sample.level);
            return VolumeVerdict::Baseline;
        };

        let Some(direction) = Direction::of_change(previous, sample.level) else {
            return VolumeVerdict::Unchanged;
        };

        let from_phone =
            phone_keys.is_likely_from_phone(direction, sample.timestamp, timings.phone_ignore_window);
        if from_phone {
            debug!(?direction, previous, level = sample.level, "Volume change attributed to phone keys");
            self.presses.clear();
            self.baseline = Some(sample.level);
            return VolumeVerdict::PhoneOriginated { direction };
        }

        match mode {
            SeekTriggerMode::SinglePressAnyVolume => VolumeVerdict::Seek {
                direction,
                restore_to: previous,
                level: sample.level,
            },
            SeekTriggerMode::DoublePressVolume => {
                match self.presses.register(
                    direction,
                    sample.timestamp,
                    timings.double_press_window,
                    previous,
                ) {
                    PressOutcome::Completed { anchor } => VolumeVerdict::Seek {
                        direction,
                        restore_to: anchor,
                        level: sample.level,
                    },
                    PressOutcome::Started | PressOutcome::Continued { .. } => {
                        debug!(?direction, previous, level = sample.level, "Double-press pending");
                        self.baseline = Some(sample.level);
                        VolumeVerdict::Pending { direction }
                    }
                }
            }
            SeekTriggerMode::SinglePressHeadset => VolumeVerdict::Unchanged,
        }
    }

    /// Let an observed level stand (seek not issued or failed)
    pub fn accept(&mut self, level: u32) {
        self.presses.clear();
        self.baseline = Some(level);
    }

    /// Ignore samples stamped before `until`
    ///
    /// Returns the deadline it replaced.
    pub fn suppress_until(&mut self, until: Timestamp) -> Option<Timestamp> {
        self.suppress_until.replace(until)
    }

    /// Put back a deadline returned by `suppress_until`
    pub fn reset_suppression(&mut self, previous: Option<Timestamp>) {
        self.suppress_until = previous;
    }

    /// Overwrite the baseline after a restoration
    pub fn set_baseline(&mut self, level: u32) {
        self.presses.clear();
        self.baseline = Some(level);
    }

    pub fn is_suppressed(&self, at: Timestamp) -> bool {
        self.suppress_until.is_some_and(|until| at < until)
    }

    pub fn baseline(&self) -> Option<u32> {
        self.baseline
    }

    pub fn suppressed_until(&self) -> Option<Timestamp> {
        self.suppress_until
    }

    pub fn pending(&self) -> Option<&PendingPress<u32>> {
        self.presses.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(level: u32, ms: u64) -> VolumeSample {
        VolumeSample::new(level, Timestamp::from_millis(ms))
    }

    fn observe(
        classifier: &mut VolumeClassifier,
        mode: SeekTriggerMode,
        level: u32,
        ms: u64,
    ) -> VolumeVerdict {
        classifier.observe(
            sample(level, ms),
            mode,
            &Timings::default(),
            &PhoneKeyCorrelator::new(),
        )
    }

    #[test]
    fn first_sample_becomes_baseline() {
        let mut classifier = VolumeClassifier::new();
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::SinglePressAnyVolume, 7, 0),
            VolumeVerdict::Baseline
        );
        assert_eq!(classifier.baseline(), Some(7));
    }

    #[test]
    fn same_level_is_a_no_op() {
        let mut classifier = VolumeClassifier::with_baseline(7);
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 7, 10),
            VolumeVerdict::Unchanged
        );
        assert!(classifier.pending().is_none());
    }

    #[test]
    fn single_press_change_is_a_seek_without_moving_baseline() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::SinglePressAnyVolume, 4, 10),
            VolumeVerdict::Seek {
                direction: Direction::Down,
                restore_to: 5,
                level: 4
            }
        );
        assert_eq!(classifier.baseline(), Some(5));
    }

    #[test]
    fn double_press_restores_to_level_before_sequence() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 6, 0),
            VolumeVerdict::Pending {
                direction: Direction::Up
            }
        );
        assert_eq!(classifier.baseline(), Some(6));
        assert_eq!(classifier.pending().map(|p| p.anchor), Some(5));

        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 7, 300),
            VolumeVerdict::Seek {
                direction: Direction::Up,
                restore_to: 5,
                level: 7
            }
        );
        assert!(classifier.pending().is_none());
    }

    #[test]
    fn opposite_change_restarts_sequence_at_pre_change_level() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 6, 0);
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 5, 100),
            VolumeVerdict::Pending {
                direction: Direction::Down
            }
        );
        let pending = classifier.pending().unwrap();
        assert_eq!(pending.anchor, 6);
        assert_eq!(pending.direction, Direction::Down);
        assert_eq!(classifier.baseline(), Some(5));
    }

    #[test]
    fn phone_change_updates_baseline_and_drops_sequence() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        let mut phone = PhoneKeyCorrelator::new();
        let timings = Timings::default();

        classifier.observe(
            sample(6, 0),
            SeekTriggerMode::DoublePressVolume,
            &timings,
            &phone,
        );
        assert!(classifier.pending().is_some());

        phone.mark(Direction::Up, Timestamp::from_millis(150));
        assert_eq!(
            classifier.observe(
                sample(7, 200),
                SeekTriggerMode::DoublePressVolume,
                &timings,
                &phone
            ),
            VolumeVerdict::PhoneOriginated {
                direction: Direction::Up
            }
        );
        assert_eq!(classifier.baseline(), Some(7));
        assert!(classifier.pending().is_none());
    }

    #[test]
    fn suppressed_samples_leave_baseline_alone() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        classifier.suppress_until(Timestamp::from_millis(900));

        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::SinglePressAnyVolume, 9, 899),
            VolumeVerdict::Suppressed
        );
        assert_eq!(classifier.baseline(), Some(5));

        assert!(matches!(
            observe(&mut classifier, SeekTriggerMode::SinglePressAnyVolume, 9, 900),
            VolumeVerdict::Seek { .. }
        ));
    }

    #[test]
    fn suppression_does_not_prime_baseline() {
        let mut classifier = VolumeClassifier::new();
        classifier.suppress_until(Timestamp::from_millis(600));
        assert_eq!(
            observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 3, 100),
            VolumeVerdict::Suppressed
        );
        assert_eq!(classifier.baseline(), None);
    }

    #[test]
    fn accept_clears_pending_and_moves_baseline() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        observe(&mut classifier, SeekTriggerMode::DoublePressVolume, 6, 0);
        classifier.accept(6);
        assert!(classifier.pending().is_none());
        assert_eq!(classifier.baseline(), Some(6));
    }

    #[test]
    fn custom_window_is_respected() {
        let mut classifier = VolumeClassifier::with_baseline(5);
        let timings = Timings {
            double_press_window: Duration::from_millis(200),
            ..Timings::default()
        };
        let phone = PhoneKeyCorrelator::new();

        classifier.observe(sample(6, 0), SeekTriggerMode::DoublePressVolume, &timings, &phone);
        assert_eq!(
            classifier.observe(sample(7, 300), SeekTriggerMode::DoublePressVolume, &timings, &phone),
            VolumeVerdict::Pending {
                direction: Direction::Up
            }
        );
    }
}
