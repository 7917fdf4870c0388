//! Chart Session
//! Owns one chart's state and turns input events into render plans.
//!
//! Every input (dropdown change, timer tick, bar click) arrives as a
//! [`ChartEvent`] and goes through a single `update` function. Each plan
//! carries the keyed diff against the previously rendered marks, so a
//! caller can animate updates and remove exiting marks without recreating
//! anything.

use crate::animation::{AnimationDriver, AnimationStep, AnimationTiming, WrapPolicy};
use crate::charts::{reconcile, AthleteList, ChartView, Frame, MarkDiff, MarkSet, TeamYearStats};
use crate::selector::{Selection, SelectorState};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    /// Dropdown value, unparsed.
    SelectionChanged(String),
    /// Timer tick with its sequence number.
    AnimationTick(u64),
    TeamClicked(String),
    ShowMore,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Positions interpolate linearly.
    Move,
    /// Opacity interpolates linearly.
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub kind: TransitionKind,
}

/// What to draw next. Last writer wins: a newer plan replaces an older one.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub frame: Frame,
    pub diff: MarkDiff,
    /// `None` means draw immediately.
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Redraw(RenderPlan),
    Detail(AthleteList),
    Unchanged,
    Stopped,
}

/// Reconcile `frame.marks` against `current` and bring `current` up to date.
fn plan(current: &mut MarkSet, frame: Frame, transition: Option<Transition>) -> RenderPlan {
    let diff = reconcile(current, frame.marks.clone());
    current.apply(&diff);
    debug!(
        enter = diff.enter.len(),
        update = diff.update.len(),
        exit = diff.exit.len(),
        "marks reconciled"
    );
    RenderPlan {
        frame,
        diff,
        transition,
    }
}

/// Session for a selector-driven chart.
pub struct ChartSession<V: ChartView> {
    view: V,
    selector: SelectorState<V::Key>,
    marks: MarkSet,
    detail: Option<AthleteList>,
}

impl<V: ChartView> ChartSession<V> {
    pub fn new(view: V) -> Self {
        let selector = SelectorState::new(view.domain());
        Self {
            view,
            selector,
            marks: MarkSet::new(),
            detail: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn selector(&self) -> &SelectorState<V::Key> {
        &self.selector
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn detail(&self) -> Option<&AthleteList> {
        self.detail.as_ref()
    }

    /// First render, on the initial key.
    pub fn start(&mut self) -> RenderPlan {
        let frame = match self.selector.current() {
            Some(key) => self.view.frame(key),
            None => self.view.empty_frame(""),
        };
        plan(&mut self.marks, frame, None)
    }

    pub fn update(&mut self, event: ChartEvent) -> Update {
        match event {
            ChartEvent::SelectionChanged(raw) => {
                let selection = match raw.parse::<V::Key>() {
                    Ok(key) => self.selector.select(key),
                    Err(_) => Selection::Unknown,
                };
                let frame = match selection {
                    Selection::Changed(key) => self.view.frame(&key),
                    Selection::Unknown => self.view.empty_frame(&raw),
                };
                Update::Redraw(plan(&mut self.marks, frame, None))
            }
            ChartEvent::TeamClicked(team) => match self.view.detail(&team) {
                Some(list) => {
                    debug!(%team, total = list.total(), "athlete list opened");
                    self.detail = Some(list.clone());
                    Update::Detail(list)
                }
                None => Update::Unchanged,
            },
            ChartEvent::ShowMore => match self.detail.as_mut() {
                Some(list) if list.has_more() => {
                    list.expand();
                    Update::Detail(list.clone())
                }
                _ => Update::Unchanged,
            },
            ChartEvent::AnimationTick(_) => Update::Unchanged,
            ChartEvent::Stop => Update::Stopped,
        }
    }
}

/// Session for the animated team scatterplot.
///
/// Every (team, year) point is created once at the origin. A year step
/// moves only that year's points; the rest keep their last position.
pub struct AnimatedSession {
    stats: TeamYearStats,
    driver: AnimationDriver,
    marks: MarkSet,
    title: String,
}

impl AnimatedSession {
    pub fn new(stats: TeamYearStats, policy: WrapPolicy, timing: AnimationTiming) -> Self {
        let driver = AnimationDriver::new(stats.years().to_vec(), policy, timing);
        Self {
            stats,
            driver,
            marks: MarkSet::new(),
            title: String::new(),
        }
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    /// Create every point at the origin, then show the first year.
    pub fn start(&mut self) -> Vec<RenderPlan> {
        let origin = self.stats.origin_marks();
        info!(points = origin.len(), years = self.stats.years().len(), "animation starting");
        let frame = self.stats.frame(self.title.clone(), origin);
        let mut plans = vec![plan(&mut self.marks, frame, None)];
        if let Some(step) = self.driver.start() {
            plans.extend(self.step(step));
        }
        plans
    }

    pub fn update(&mut self, event: ChartEvent) -> Update {
        match event {
            ChartEvent::AnimationTick(seq) => match self.driver.tick() {
                Some(step) => {
                    debug!(seq, ?step, "animated chart tick");
                    self.step(step).map_or(Update::Unchanged, Update::Redraw)
                }
                None => Update::Unchanged,
            },
            ChartEvent::Stop => {
                self.driver.stop();
                Update::Stopped
            }
            _ => Update::Unchanged,
        }
    }

    fn step(&mut self, step: AnimationStep) -> Option<RenderPlan> {
        let timing = self.driver.timing();
        let (next, transition) = match step {
            AnimationStep::Show { year, .. } => {
                self.title = format!("Year: {year}");
                let moved = self
                    .stats
                    .year_marks(year)
                    .into_iter()
                    .map(|m| m.with_opacity(1.0))
                    .collect();
                (self.marks.merged(moved), (timing.transition, TransitionKind::Move))
            }
            AnimationStep::FadeOut => (
                self.marks.mapped(|m| m.clone().with_opacity(0.0)),
                (timing.fade, TransitionKind::Fade),
            ),
            AnimationStep::Hold => return None,
            AnimationStep::FadeIn => {
                let (ox, oy) = self.stats.origin();
                (
                    self.marks.mapped(|m| m.clone().at(ox, oy).with_opacity(1.0)),
                    (timing.fade, TransitionKind::Fade),
                )
            }
        };
        let frame = self.stats.frame(self.title.clone(), next);
        let (duration, kind) = transition;
        Some(plan(&mut self.marks, frame, Some(Transition { duration, kind })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{animated_layout, Layout, MedalsBySport, YearScatter, DEFAULT_LIST_CAP};
    use crate::data::{AthleteRecord, Medal};
    use proptest::prelude::*;

    fn records() -> Vec<AthleteRecord> {
        vec![
            AthleteRecord::new("Ana", "USA", "Judo", Some(1992), Medal::Gold).with_body(170.0, 60.0),
            AthleteRecord::new("Bia", "USA", "Judo", Some(1996), Medal::NoMedal).with_body(180.0, 70.0),
            AthleteRecord::new("Caio", "JPN", "Judo", Some(1996), Medal::Silver).with_body(165.0, 66.0),
            AthleteRecord::new("Duda", "BRA", "Swimming", Some(2000), Medal::NoMedal).with_body(190.0, 85.0),
        ]
    }

    fn redraw(update: Update) -> RenderPlan {
        match update {
            Update::Redraw(plan) => plan,
            other => panic!("expected a redraw, got {other:?}"),
        }
    }

    #[test]
    fn start_renders_first_sport() {
        let records = records();
        let mut session =
            ChartSession::new(MedalsBySport::new(&records, Layout::default(), DEFAULT_LIST_CAP));
        let plan = session.start();
        assert_eq!(plan.frame.title, "Judo");
        assert_eq!(plan.diff.enter.len(), 2);
        assert_eq!(session.marks().len(), 2);
    }

    #[test]
    fn switching_sport_diffs_by_country() {
        let records = records();
        let mut session =
            ChartSession::new(MedalsBySport::new(&records, Layout::default(), DEFAULT_LIST_CAP));
        session.start();

        let plan = redraw(session.update(ChartEvent::SelectionChanged("Swimming".into())));
        let exited: Vec<_> = plan.diff.exit.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(exited, vec!["USA", "JPN"]);
        assert_eq!(plan.diff.enter[0].key, "BRA");
        assert_eq!(session.selector().current().map(String::as_str), Some("Swimming"));
    }

    #[test]
    fn unknown_key_draws_empty_view() {
        let records = records();
        let mut session = ChartSession::new(YearScatter::new(&records, Layout::default()));
        session.start();

        let plan = redraw(session.update(ChartEvent::SelectionChanged("abc".into())));
        assert!(plan.frame.marks.is_empty());
        assert!(session.marks().is_empty());
        assert_eq!(session.selector().current(), Some(&1992));

        let plan = redraw(session.update(ChartEvent::SelectionChanged("2024".into())));
        assert!(plan.frame.marks.is_empty());
    }

    #[test]
    fn team_click_then_show_more() {
        let records: Vec<_> = (0..30)
            .map(|i| AthleteRecord::new(format!("A{i}"), "USA", "Judo", Some(2000), Medal::NoMedal))
            .collect();
        let mut session =
            ChartSession::new(MedalsBySport::new(&records, Layout::default(), DEFAULT_LIST_CAP));
        session.start();

        match session.update(ChartEvent::TeamClicked("USA".into())) {
            Update::Detail(list) => assert_eq!(list.visible().len(), 25),
            other => panic!("unexpected {other:?}"),
        }
        match session.update(ChartEvent::ShowMore) {
            Update::Detail(list) => assert_eq!(list.visible().len(), 30),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(session.update(ChartEvent::ShowMore), Update::Unchanged);
    }

    #[test]
    fn scatter_has_no_detail() {
        let records = records();
        let mut session = ChartSession::new(YearScatter::new(&records, Layout::default()));
        assert_eq!(session.update(ChartEvent::TeamClicked("USA".into())), Update::Unchanged);
    }

    fn animated(policy: WrapPolicy) -> AnimatedSession {
        let stats = TeamYearStats::new(&records(), animated_layout(900, 600));
        AnimatedSession::new(stats, policy, AnimationTiming::for_policy(policy))
    }

    #[test]
    fn animation_starts_at_origin_then_first_year() {
        let mut session = animated(WrapPolicy::Simple);
        let plans = session.start();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].diff.enter.len(), 4);
        assert_eq!(plans[0].transition, None);

        let first_year = &plans[1];
        assert_eq!(first_year.frame.title, "Year: 1992");
        assert!(first_year.diff.enter.is_empty() && first_year.diff.exit.is_empty());
        let moved: Vec<_> = first_year
            .diff
            .update
            .iter()
            .filter(|u| u.is_changed())
            .map(|u| u.next.key.as_str())
            .collect();
        assert_eq!(moved, vec!["USA:1992"]);
        assert_eq!(
            first_year.transition,
            Some(Transition { duration: Duration::from_millis(1000), kind: TransitionKind::Move })
        );
    }

    #[test]
    fn reset_policy_fades_out_and_back() {
        let mut session = animated(WrapPolicy::FadeReset);
        session.start();
        session.update(ChartEvent::AnimationTick(1));
        session.update(ChartEvent::AnimationTick(2));

        let fade_out = redraw(session.update(ChartEvent::AnimationTick(3)));
        assert!(fade_out.frame.marks.iter().all(|m| m.opacity == 0.0));
        assert_eq!(session.update(ChartEvent::AnimationTick(4)), Update::Unchanged);
        assert_eq!(session.update(ChartEvent::AnimationTick(5)), Update::Unchanged);

        let fade_in = redraw(session.update(ChartEvent::AnimationTick(6)));
        let origin = TeamYearStats::new(&records(), animated_layout(900, 600)).origin();
        assert!(fade_in.frame.marks.iter().all(|m| (m.x, m.y) == origin && m.opacity == 1.0));

        let restart = redraw(session.update(ChartEvent::AnimationTick(7)));
        assert_eq!(restart.frame.title, "Year: 1992");
    }

    #[test]
    fn stop_ignores_later_ticks() {
        let mut session = animated(WrapPolicy::Simple);
        session.start();
        assert_eq!(session.update(ChartEvent::Stop), Update::Stopped);
        assert_eq!(session.update(ChartEvent::AnimationTick(9)), Update::Unchanged);
        assert!(!session.driver().is_running());
    }

    proptest! {
        #[test]
        fn prop_unknown_year_never_draws(year in 2001i32..3000) {
            let records = records();
            let mut session = ChartSession::new(YearScatter::new(&records, Layout::default()));
            session.start();
            let update = session.update(ChartEvent::SelectionChanged(year.to_string()));
            match update {
                Update::Redraw(plan) => prop_assert!(plan.frame.marks.is_empty()),
                _ => prop_assert!(false),
            }
        }
    }
}
