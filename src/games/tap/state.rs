use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest target a new game can draw.
pub const MIN_TARGET: u32 = 1;
/// Largest target a new game can draw.
pub const MAX_TARGET: u32 = 50;

const FINAL_THRESHOLD: f64 = 0.66;
const MEDIAN_THRESHOLD: f64 = 0.33;

/// Authoritative game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    Won,
    GivenUp,
}

/// Visual stage selector; the shell maps each one to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Initial,
    Median,
    Final,
    Victory,
    Defeat,
}

impl Stage {
    /// Stage shown while playing. Thresholds are inclusive, checked from the top.
    pub fn for_progress(progress: f64) -> Self {
        if progress >= 1.0 {
            Stage::Victory
        } else if progress >= FINAL_THRESHOLD {
            Stage::Final
        } else if progress >= MEDIAN_THRESHOLD {
            Stage::Median
        } else {
            Stage::Initial
        }
    }

    /// The only stage consistent with `phase` at the given progress.
    pub fn derive(phase: Phase, progress: f64) -> Self {
        match phase {
            Phase::Playing => Stage::for_progress(progress),
            Phase::Won => Stage::Victory,
            Phase::GivenUp => Stage::Defeat,
        }
    }
}

/// Why a persisted state cannot be restored.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    TargetOutOfRange(u32),
    PhaseMismatch { phase: Phase, click_count: u32, target_count: u32 },
    StageMismatch { expected: Stage, found: Stage },
    StrayConfirmation(Phase),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::TargetOutOfRange(target) => write!(
                f,
                "target count {target} is outside {MIN_TARGET}..={MAX_TARGET}"
            ),
            SnapshotError::PhaseMismatch { phase, click_count, target_count } => write!(
                f,
                "phase {phase:?} is impossible with {click_count}/{target_count} taps"
            ),
            SnapshotError::StageMismatch { expected, found } => {
                write!(f, "stage {found:?} recorded where {expected:?} was expected")
            }
            SnapshotError::StrayConfirmation(phase) => {
                write!(f, "confirmation prompt flagged while {phase:?}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// The single live game. Only `GameController` mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) click_count: u32,
    pub(crate) target_count: u32,
    pub(crate) phase: Phase,
    pub(crate) stage: Stage,
    pub(crate) awaiting_confirmation: bool,
}

impl GameState {
    pub(crate) fn fresh(target_count: u32) -> Self {
        Self {
            click_count: 0,
            target_count,
            phase: Phase::Playing,
            stage: Stage::Initial,
            awaiting_confirmation: false,
        }
    }

    /// Reassembles a state from individually persisted fields.
    pub fn from_parts(
        click_count: u32,
        target_count: u32,
        phase: Phase,
        stage: Stage,
        awaiting_confirmation: bool,
    ) -> Result<Self, SnapshotError> {
        let state = Self {
            click_count,
            target_count,
            phase,
            stage,
            awaiting_confirmation,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    /// Taps so far divided by the target.
    pub fn progress(&self) -> f64 {
        f64::from(self.click_count) / f64::from(self.target_count)
    }

    /// Checks the invariants a live game always holds.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !(MIN_TARGET..=MAX_TARGET).contains(&self.target_count) {
            return Err(SnapshotError::TargetOutOfRange(self.target_count));
        }

        // Taps stop counting once the target is reached.
        let phase_fits = match self.phase {
            Phase::Playing => self.click_count < self.target_count,
            Phase::Won => self.click_count == self.target_count,
            Phase::GivenUp => self.click_count <= self.target_count,
        };
        if !phase_fits {
            return Err(SnapshotError::PhaseMismatch {
                phase: self.phase,
                click_count: self.click_count,
                target_count: self.target_count,
            });
        }

        let expected = Stage::derive(self.phase, self.progress());
        if self.stage != expected {
            return Err(SnapshotError::StageMismatch {
                expected,
                found: self.stage,
            });
        }

        if self.awaiting_confirmation && self.phase != Phase::Won {
            return Err(SnapshotError::StrayConfirmation(self.phase));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(Stage::for_progress(0.0), Stage::Initial);
        assert_eq!(Stage::for_progress(0.3), Stage::Initial);
        assert_eq!(Stage::for_progress(0.33), Stage::Median);
        assert_eq!(Stage::for_progress(0.5), Stage::Median);
        assert_eq!(Stage::for_progress(0.66), Stage::Final);
        assert_eq!(Stage::for_progress(0.99), Stage::Final);
        assert_eq!(Stage::for_progress(1.0), Stage::Victory);
    }

    #[test]
    fn test_stage_at_exact_fraction_boundary() {
        // 33/50 is exactly 0.66 and must select the higher stage
        let progress = f64::from(33u32) / f64::from(50u32);
        assert_eq!(Stage::for_progress(progress), Stage::Final);

        let progress = f64::from(32u32) / f64::from(50u32);
        assert_eq!(Stage::for_progress(progress), Stage::Median);
    }

    #[test]
    fn test_derive_ignores_progress_outside_playing() {
        assert_eq!(Stage::derive(Phase::GivenUp, 0.1), Stage::Defeat);
        assert_eq!(Stage::derive(Phase::GivenUp, 1.0), Stage::Defeat);
        assert_eq!(Stage::derive(Phase::Won, 1.0), Stage::Victory);
    }

    #[test]
    fn test_from_parts_accepts_consistent_state() {
        let state = GameState::from_parts(7, 10, Phase::Playing, Stage::Final, false).unwrap();
        assert_eq!(state.click_count(), 7);
        assert_eq!(state.target_count(), 10);
        assert!((state.progress() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_parts_rejects_zero_target() {
        let err = GameState::from_parts(0, 0, Phase::Playing, Stage::Initial, false).unwrap_err();
        assert_eq!(err, SnapshotError::TargetOutOfRange(0));

        let err = GameState::from_parts(0, 51, Phase::Playing, Stage::Initial, false).unwrap_err();
        assert_eq!(err, SnapshotError::TargetOutOfRange(51));
    }

    #[test]
    fn test_from_parts_rejects_independent_stage() {
        let err = GameState::from_parts(1, 10, Phase::Playing, Stage::Final, false).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::StageMismatch {
                expected: Stage::Initial,
                found: Stage::Final
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_unreached_win() {
        let err = GameState::from_parts(4, 5, Phase::Won, Stage::Victory, true).unwrap_err();
        assert!(matches!(err, SnapshotError::PhaseMismatch { .. }));

        let err = GameState::from_parts(5, 5, Phase::Playing, Stage::Victory, false).unwrap_err();
        assert!(matches!(err, SnapshotError::PhaseMismatch { .. }));
    }

    #[test]
    fn test_from_parts_rejects_taps_past_target() {
        let err = GameState::from_parts(99, 10, Phase::Won, Stage::Victory, true).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::PhaseMismatch {
                phase: Phase::Won,
                click_count: 99,
                target_count: 10
            }
        );

        let err = GameState::from_parts(500, 10, Phase::GivenUp, Stage::Defeat, false).unwrap_err();
        assert!(matches!(err, SnapshotError::PhaseMismatch { phase: Phase::GivenUp, .. }));

        // Giving up right after winning keeps the full count
        assert!(GameState::from_parts(10, 10, Phase::GivenUp, Stage::Defeat, false).is_ok());
    }

    #[test]
    fn test_from_parts_rejects_prompt_outside_win() {
        let err = GameState::from_parts(2, 5, Phase::GivenUp, Stage::Defeat, true).unwrap_err();
        assert_eq!(err, SnapshotError::StrayConfirmation(Phase::GivenUp));
    }

    #[test]
    fn test_serialized_field_names() {
        let state = GameState::fresh(12);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["clickCount"], 0);
        assert_eq!(json["targetCount"], 12);
        assert_eq!(json["phase"], "playing");
        assert_eq!(json["stage"], "initial");
        assert_eq!(json["awaitingConfirmation"], false);
    }
}
