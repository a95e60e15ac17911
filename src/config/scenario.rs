use crate::{
    animation::tween::Tweener,
    config::model::StageConfig,
    events::{TimedEvent, UiEvent},
    foundation::error::{PageflowError, PageflowResult, ensure_seconds},
    host::scene::SceneGraph,
    page::Page,
    stage::{Stage, stack::StackOutcome},
};

/// Default replay step, one 60 Hz frame.
pub const DEFAULT_STEP: f64 = 1.0 / 60.0;

/// Requests a scenario can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioRequest {
    KeepCurrentAndOpen,
    CloseCurrentAndOpen,
    CloseCurrentOnly,
    ForceClose,
    ShowWithoutAnimation,
    HideWithoutAnimation,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioStep {
    /// Stage time the request is issued at.
    pub at: f64,
    pub request: ScenarioRequest,
    pub page: String,
}

/// A stage plus a timed list of requests against it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub stage: StageConfig,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
    /// Stop time; by default the replay runs until every sequence has had time to settle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<f64>,
}

/// One journal entry with names resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineEntry {
    pub at: f64,
    /// `page` or `page/element`.
    pub source: String,
    pub signal: &'static str,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepReport {
    pub at: f64,
    pub request: ScenarioRequest,
    pub page: String,
    pub outcome: StackOutcome,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageDurations {
    pub page: String,
    pub show: f64,
    pub hide: f64,
}

/// Result of replaying a [`Scenario`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScenarioReport {
    pub end: f64,
    pub steps: Vec<StepReport>,
    pub timeline: Vec<TimelineEntry>,
    /// Open pages at the end of the replay, bottom first.
    pub open_pages: Vec<String>,
    pub durations: Vec<PageDurations>,
}

impl Scenario {
    pub fn from_json_str(s: &str) -> PageflowResult<Self> {
        let scenario: Self = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> PageflowResult<()> {
        self.stage.validate()?;
        let mut last = 0.0;
        for (i, step) in self.steps.iter().enumerate() {
            ensure_seconds(&format!("step {i} time"), step.at)?;
            if step.at < last {
                return Err(PageflowError::validation(format!(
                    "step {i} at {} is earlier than the step before it",
                    step.at
                )));
            }
            last = step.at;
            if !self.stage.pages.iter().any(|p| p.name == step.page) {
                return Err(PageflowError::config(format!(
                    "step {i} references unknown page '{}'",
                    step.page
                )));
            }
        }
        if let Some(until) = self.until {
            ensure_seconds("until", until)?;
        }
        Ok(())
    }

    /// Replay against an in-memory scene graph, advancing the clock by at most `step`
    /// seconds per update.
    #[tracing::instrument(skip(self))]
    pub fn run(&self, step: f64) -> PageflowResult<ScenarioReport> {
        self.validate()?;
        if !step.is_finite() || step <= 0.0 {
            return Err(PageflowError::validation(format!(
                "replay step must be > 0, got {step}"
            )));
        }

        let mut stage = self.stage.load(SceneGraph::new(), Tweener::new())?;
        stage.start();

        let mut steps = Vec::with_capacity(self.steps.len());
        for s in &self.steps {
            advance_until(&mut stage, s.at, step);
            let Some(id) = stage.page_id(&s.page) else {
                return Err(PageflowError::config(format!("unknown page '{}'", s.page)));
            };
            let outcome = match s.request {
                ScenarioRequest::KeepCurrentAndOpen => stage.keep_current_and_open(id),
                ScenarioRequest::CloseCurrentAndOpen => stage.close_current_and_open(id),
                ScenarioRequest::CloseCurrentOnly => stage.close_current_only(id),
                ScenarioRequest::ForceClose => stage.force_close(id),
                ScenarioRequest::ShowWithoutAnimation => stage.show_without_animation(id),
                ScenarioRequest::HideWithoutAnimation => stage.hide_without_animation(id),
            };
            steps.push(StepReport {
                at: stage.now(),
                request: s.request,
                page: s.page.clone(),
                outcome,
            });
        }

        let end = self.until.unwrap_or_else(|| self.settle_time(&stage));
        advance_until(&mut stage, end, step);

        let timeline = stage
            .events()
            .iter()
            .map(|e| timeline_entry(&stage, e))
            .collect();
        let open_pages = stage
            .open_pages()
            .iter()
            .filter_map(|&id| stage.page(id).map(|p| p.name().to_string()))
            .collect();

        Ok(ScenarioReport {
            end: stage.now(),
            steps,
            timeline,
            open_pages,
            durations: durations(&stage),
        })
    }

    /// Last request time (or first-page time) plus the longest hide and show, which
    /// covers a close-and-open issued by the last request.
    fn settle_time(&self, stage: &Stage<SceneGraph, Tweener>) -> f64 {
        let last_request = self.steps.last().map_or(0.0, |s| s.at);
        let first_page = self.stage.first_page.as_ref().map_or(0.0, |f| f.delay);
        let longest = |f: fn(&Page) -> f64| {
            stage.pages().iter().map(f).fold(0.0, f64::max)
        };
        last_request.max(first_page)
            + longest(Page::hide_duration)
            + longest(Page::show_duration)
    }
}

/// Show and hide durations of every page, in declaration order.
pub fn durations(stage: &Stage<SceneGraph, Tweener>) -> Vec<PageDurations> {
    stage
        .pages()
        .iter()
        .map(|p| PageDurations {
            page: p.name().to_string(),
            show: p.show_duration(),
            hide: p.hide_duration(),
        })
        .collect()
}

fn advance_until(stage: &mut Stage<SceneGraph, Tweener>, t: f64, step: f64) {
    const EPS: f64 = 1e-9;
    loop {
        let remaining = t - stage.now();
        if remaining <= EPS {
            break;
        }
        stage.update(remaining.min(step));
    }
}

fn timeline_entry(stage: &Stage<SceneGraph, Tweener>, e: &TimedEvent) -> TimelineEntry {
    let (source, signal) = match e.event {
        UiEvent::Page { page, signal } => (
            stage
                .page(page)
                .map_or_else(|| page.to_string(), |p| p.name().to_string()),
            signal.as_str(),
        ),
        UiEvent::Element { element, signal } => {
            let name = stage.page(element.page).and_then(|p| {
                p.element(element.index as usize)
                    .map(|el| format!("{}/{}", p.name(), el.name()))
            });
            (name.unwrap_or_else(|| element.to_string()), signal.as_str())
        }
    };
    TimelineEntry {
        at: e.at,
        source,
        signal,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/scenario.rs"]
mod tests;
