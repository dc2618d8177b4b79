//! Per-invocation context shared by the command handlers.

use sitecrypt_core::FileArtifactStore;

use crate::cli::{ArtifactArgs, Cli};
use crate::config::{load_config, ResolvedPaths};
use crate::ui::UiContext;

pub struct AppContext<'a> {
    cli: &'a Cli,
    ui: UiContext,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            ui: UiContext::from_env(cli.json, cli.no_color, cli.ascii, cli.quiet),
        }
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Load config and settle every path for this run.
    pub fn resolve_paths(
        &self,
        input: Option<&std::path::Path>,
        artifacts: &ArtifactArgs,
    ) -> anyhow::Result<ResolvedPaths> {
        let config = load_config(self.cli)?;
        let paths = config.resolve(input, artifacts);
        tracing::info!(
            input = %paths.input.display(),
            ciphertext = %paths.ciphertext.display(),
            record = %paths.record.display(),
            "resolved paths"
        );
        Ok(paths)
    }
}

impl ResolvedPaths {
    pub fn store(&self) -> FileArtifactStore {
        FileArtifactStore::new(self.ciphertext.clone(), self.record.clone())
    }
}
