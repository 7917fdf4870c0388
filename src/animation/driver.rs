//! Animation Driver
//! Cycles a cursor through a sorted list of years, one step per timer tick.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// What happens after the last year has been shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapPolicy {
    /// Jump straight back to the first year.
    #[default]
    Simple,
    /// Fade every mark out, hold, move marks back to the origin and fade
    /// them in, then restart from the first year.
    FadeReset,
}

/// Durations driving the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    /// Time between ticks.
    pub interval: Duration,
    /// Position transition applied when a year is shown.
    pub transition: Duration,
    /// Fade-out and fade-in length (reset policy only).
    pub fade: Duration,
    /// Pause between fade-out and fade-in (reset policy only).
    pub pause: Duration,
}

impl AnimationTiming {
    /// 2s per year, 1s moves.
    pub fn basic() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            transition: Duration::from_millis(1000),
            fade: Duration::from_millis(1000),
            pause: Duration::from_millis(2000),
        }
    }

    /// 1s per year, 1s fades, 2s hold.
    pub fn with_reset() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            ..Self::basic()
        }
    }

    /// Defaults matching a policy.
    pub fn for_policy(policy: WrapPolicy) -> Self {
        match policy {
            WrapPolicy::Simple => Self::basic(),
            WrapPolicy::FadeReset => Self::with_reset(),
        }
    }

    fn ticks_for(&self, span: Duration) -> u32 {
        let interval = self.interval.as_millis().max(1);
        (span.as_millis().div_ceil(interval) as u32).max(1)
    }

    /// Ticks from fade-out start to fade-in start.
    fn hold_ticks(&self) -> u32 {
        self.ticks_for(self.fade + self.pause)
    }

    /// Ticks from fade-in start to the first year reappearing.
    fn fade_in_ticks(&self) -> u32 {
        self.ticks_for(self.fade)
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::basic()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    FadeOut,
    Hold,
    FadeIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running { cursor: usize },
    Resetting { stage: ResetStage, ticks_left: u32 },
}

/// Instruction for the renderer produced by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// Move the year's marks to their positions.
    Show { index: usize, year: i32 },
    /// Fade all marks to transparent.
    FadeOut,
    /// Nothing to draw this tick.
    Hold,
    /// Park all marks at the origin and fade them back in.
    FadeIn,
}

/// Year-cycling state machine. Pure: ticks are fed in from outside.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    years: Vec<i32>,
    policy: WrapPolicy,
    timing: AnimationTiming,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(years: Vec<i32>, policy: WrapPolicy, timing: AnimationTiming) -> Self {
        Self {
            years,
            policy,
            timing,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn is_running(&self) -> bool {
        self.state != DriverState::Idle
    }

    /// Year under the cursor while running.
    pub fn current_year(&self) -> Option<i32> {
        match self.state {
            DriverState::Running { cursor } => self.years.get(cursor).copied(),
            _ => None,
        }
    }

    /// Ticks from one showing of the first year to the next.
    pub fn cycle_ticks(&self) -> usize {
        if self.years.is_empty() {
            return 0;
        }
        match self.policy {
            WrapPolicy::Simple => self.years.len(),
            WrapPolicy::FadeReset => {
                self.years.len() + (self.timing.hold_ticks() + self.timing.fade_in_ticks()) as usize
            }
        }
    }

    /// Begin at the first year. With no years the driver stays idle.
    pub fn start(&mut self) -> Option<AnimationStep> {
        if self.years.is_empty() {
            return None;
        }
        Some(self.show(0))
    }

    /// Back to idle; later ticks are ignored until the next `start`.
    pub fn stop(&mut self) {
        debug!("animation stopped");
        self.state = DriverState::Idle;
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> Option<AnimationStep> {
        let step = match self.state {
            DriverState::Idle => return None,
            DriverState::Running { cursor } if cursor + 1 < self.years.len() => self.show(cursor + 1),
            DriverState::Running { .. } => match self.policy {
                WrapPolicy::Simple => self.show(0),
                WrapPolicy::FadeReset => {
                    self.state = DriverState::Resetting {
                        stage: ResetStage::FadeOut,
                        ticks_left: self.timing.hold_ticks(),
                    };
                    AnimationStep::FadeOut
                }
            },
            DriverState::Resetting {
                stage: ResetStage::FadeOut | ResetStage::Hold,
                ticks_left,
            } => {
                if ticks_left > 1 {
                    self.state = DriverState::Resetting {
                        stage: ResetStage::Hold,
                        ticks_left: ticks_left - 1,
                    };
                    AnimationStep::Hold
                } else {
                    self.state = DriverState::Resetting {
                        stage: ResetStage::FadeIn,
                        ticks_left: self.timing.fade_in_ticks(),
                    };
                    AnimationStep::FadeIn
                }
            }
            DriverState::Resetting {
                stage: ResetStage::FadeIn,
                ticks_left,
            } => {
                if ticks_left > 1 {
                    self.state = DriverState::Resetting {
                        stage: ResetStage::FadeIn,
                        ticks_left: ticks_left - 1,
                    };
                    AnimationStep::Hold
                } else {
                    self.show(0)
                }
            }
        };
        debug!(?step, "animation tick");
        Some(step)
    }

    fn show(&mut self, index: usize) -> AnimationStep {
        self.state = DriverState::Running { cursor: index };
        AnimationStep::Show {
            index,
            year: self.years[index],
        }
    }
}
