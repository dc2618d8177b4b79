//! Step list that mirrors pipeline stages as they complete.

use sitecrypt_core::{SiteCryptError, Stage, StageObserver};

use super::context::UiContext;
use super::render::badge;
use super::theme::Badge;

/// Where progress lines go. `decrypt` keeps stdout for the plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Shows progress through a fixed list of pipeline stages.
pub struct StepList<'a> {
    ctx: &'a UiContext,
    steps: Vec<(Stage, Option<Badge>)>,
    stream: Stream,
}

impl<'a> StepList<'a> {
    pub fn new(ctx: &'a UiContext, stages: &[Stage]) -> Self {
        Self {
            ctx,
            steps: stages.iter().map(|s| (*s, None)).collect(),
            stream: Stream::Stdout,
        }
    }

    pub fn on_stream(mut self, stream: Stream) -> Self {
        self.stream = stream;
        self
    }

    /// Print the header line in pretty mode.
    pub fn start(&self, header: &str) {
        if self.ctx.shows_progress() && self.ctx.mode.is_pretty() {
            self.emit(&format!("{}...", header));
        }
    }

    fn complete(&mut self, index: usize, result: Badge) {
        self.steps[index].1 = Some(result);
        if self.ctx.shows_progress() {
            let line = self.render_step(index);
            self.emit(&line);
        }
    }

    fn render_step(&self, index: usize) -> String {
        let (stage, result) = &self.steps[index];
        let result = result.unwrap_or(Badge::Warn);
        if self.ctx.mode.is_pretty() {
            format!("- {}: {}", stage.name(), badge(self.ctx, result, ""))
        } else {
            format!("check={} {}", stage.name().replace(' ', "_"), result.plain())
        }
    }

    fn emit(&self, line: &str) {
        match self.stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

impl StageObserver for StepList<'_> {
    fn on_stage(&mut self, stage: Stage) {
        if let Some(index) = self.steps.iter().position(|(s, r)| *s == stage && r.is_none()) {
            self.complete(index, Badge::Ok);
        }
    }

    fn on_failure(&mut self, _reached: Option<Stage>, _error: &SiteCryptError) {
        if let Some(index) = self.steps.iter().position(|(_, r)| r.is_none()) {
            self.complete(index, Badge::Err);
        }
    }
}
