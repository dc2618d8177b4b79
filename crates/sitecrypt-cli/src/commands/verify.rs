use serde_json::json;
use sitecrypt_core::{PlaintextSource, Pipeline, Stage};

use super::open_document;
use crate::app::AppContext;
use crate::cli::SealArgs;
use crate::helpers::resolve_password;
use crate::ui::{receipt, OutputMode, StepList};

pub fn handle_verify(ctx: &AppContext, args: &SealArgs) -> anyhow::Result<()> {
    let password = resolve_password(&args.password, false)?;

    let paths = ctx.resolve_paths(args.input.as_deref(), &args.artifacts)?;
    let document = open_document(&paths.input)?;
    let expected = document.plaintext()?;
    let ui = ctx.ui();

    let mut steps = StepList::new(ui, &Stage::VERIFY);
    steps.start("Verifying");
    Pipeline::reopen(password, paths.store())?
        .with_observer(&mut steps)
        .verify(&expected)?;

    if ui.quiet {
        return Ok(());
    }

    match ui.mode {
        OutputMode::Json => {
            let output = json!({
                "status": "ok",
                "input": paths.input.display().to_string(),
                "ciphertext": paths.ciphertext.display().to_string(),
                "record": paths.record.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputMode::Pretty | OutputMode::Plain => {
            println!(
                "{}",
                receipt(
                    ui,
                    "Artifact matches source",
                    &[("Input", paths.input.display().to_string())],
                )
            );
        }
    }
    Ok(())
}
