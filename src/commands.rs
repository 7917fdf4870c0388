//! Subcommand implementations for the `olympic-charts` binary.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result};
use olympic_charts::animation::{Ticker, WrapPolicy};
use olympic_charts::charts::{
    ChartView, MedalsBySport, StaticChartRenderer, TeamBar, TeamYearStats, YearReport, YearScatter,
};
use olympic_charts::config::ChartConfig;
use olympic_charts::data::{AthleteRecord, DataLoader};
use olympic_charts::session::{AnimatedSession, ChartEvent, ChartSession, RenderPlan, Update};
use serde::Serialize;
use tracing::{info, warn};

/// Config file (if any) with `--data` applied on top.
pub(crate) fn resolve_config(path: Option<&Path>, data: Option<PathBuf>) -> Result<ChartConfig> {
    let mut config = match path {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    if let Some(data) = data {
        config.data_path = data;
    }
    Ok(config)
}

fn load_records(config: &ChartConfig) -> Result<Vec<AthleteRecord>> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    Ok(loader.into_records()?)
}

fn write_plan(plan: &RenderPlan, path: &Path) -> Result<()> {
    StaticChartRenderer::render_to_file(&plan.frame, path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(
        path = %path.display(),
        title = %plan.frame.title,
        marks = plan.frame.marks.len(),
        "chart written"
    );
    Ok(())
}

/// Apply a selection, keeping the initial plan when nothing was redrawn.
fn select<V: ChartView>(session: &mut ChartSession<V>, plan: RenderPlan, key: Option<String>) -> RenderPlan {
    match key.map(|key| session.update(ChartEvent::SelectionChanged(key))) {
        Some(Update::Redraw(next)) => next,
        _ => plan,
    }
}

pub(crate) fn bars(
    config: &ChartConfig,
    sport: Option<String>,
    team: Option<String>,
    all: bool,
    out: &Path,
) -> Result<()> {
    let records = load_records(config)?;
    let mut session = ChartSession::new(MedalsBySport::new(&records, config.bar_layout(), config.list_cap));
    let plan = session.start();
    let plan = select(&mut session, plan, sport);
    write_plan(&plan, out)?;

    let Some(team) = team else {
        return Ok(());
    };
    session.update(ChartEvent::TeamClicked(team));
    if all {
        session.update(ChartEvent::ShowMore);
    }

    let mut stdout = io::stdout().lock();
    if let Some(list) = session.detail() {
        writeln!(stdout, "{} ({} athletes)", list.team, list.total())?;
        for item in list.visible() {
            writeln!(stdout, "  {item}")?;
        }
        if list.has_more() {
            writeln!(stdout, "  ... {} more (--all)", list.total() - list.visible().len())?;
        }
    }
    Ok(())
}

pub(crate) fn scatter(config: &ChartConfig, year: Option<String>, out: &Path) -> Result<()> {
    let records = load_records(config)?;
    let mut session = ChartSession::new(YearScatter::new(&records, config.scatter_layout()));
    let plan = session.start();
    let plan = select(&mut session, plan, year);
    write_plan(&plan, out)?;

    // An unknown year drew an empty chart and has nothing to report
    if plan.frame.marks.is_empty() {
        return Ok(());
    }
    if let Some(&year) = session.selector().current() {
        let report = session.view().report(year);
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "{year}: {} entries, {} medals",
            report.summary.count, report.summary.medal_count
        )?;
        for record in &report.duplicates {
            writeln!(
                stdout,
                "  duplicate: {} ({} cm, {} kg)",
                record.name, record.height, record.weight
            )?;
        }
    }
    Ok(())
}

pub(crate) fn animate(
    mut config: ChartConfig,
    policy: Option<WrapPolicy>,
    ticks: Option<u64>,
    out_dir: &Path,
    realtime: bool,
) -> Result<()> {
    if let Some(policy) = policy {
        config.animation.policy = policy;
    }
    let records = load_records(&config)?;
    let stats = TeamYearStats::new(&records, config.animated_layout());
    let timing = config.animation.timing();
    let mut session = AnimatedSession::new(stats, config.animation.policy, timing);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut written = 0usize;
    let mut write = |plan: &RenderPlan| -> Result<()> {
        write_plan(plan, &out_dir.join(format!("frame_{written:04}.svg")))?;
        written += 1;
        Ok(())
    };

    for plan in session.start() {
        write(&plan)?;
    }
    let ticks = ticks.unwrap_or(session.driver().cycle_ticks() as u64);
    if !session.driver().is_running() {
        warn!("no years to animate");
        return Ok(());
    }

    if realtime {
        let (tx, rx) = mpsc::channel();
        let mut ticker = Ticker::spawn(timing.interval, tx, ChartEvent::AnimationTick);
        for event in rx.iter().take(ticks as usize) {
            if let Update::Redraw(plan) = session.update(event) {
                write(&plan)?;
            }
        }
        ticker.stop();
    } else {
        for seq in 1..=ticks {
            if let Update::Redraw(plan) = session.update(ChartEvent::AnimationTick(seq)) {
                write(&plan)?;
            }
        }
    }
    session.update(ChartEvent::Stop);
    info!(frames = written, dir = %out_dir.display(), "animation written");
    Ok(())
}

#[derive(Serialize)]
struct SportSummary {
    sport: String,
    teams: Vec<TeamBar>,
}

#[derive(Serialize)]
struct DatasetSummary<'a> {
    rows: usize,
    sports: Vec<SportSummary>,
    years: Vec<YearReport<'a>>,
}

pub(crate) fn summary(config: &ChartConfig, sport: Option<String>) -> Result<()> {
    let records = load_records(config)?;
    let medals = MedalsBySport::new(&records, config.bar_layout(), config.list_cap);
    let scatter = YearScatter::new(&records, config.scatter_layout());

    let sports = match sport {
        Some(sport) => vec![sport],
        None => medals.domain(),
    };
    let summary = DatasetSummary {
        rows: records.len(),
        sports: sports
            .into_iter()
            .map(|sport| SportSummary {
                teams: medals.bars(&sport),
                sport,
            })
            .collect(),
        years: scatter.domain().into_iter().map(|year| scatter.report(year)).collect(),
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary)?;
    writeln!(stdout)?;
    Ok(())
}
