use serde_json::json;
use sitecrypt_core::crypto::validate_password;
use sitecrypt_core::{Pipeline, Stage};

use super::open_document;
use crate::app::AppContext;
use crate::cli::SealArgs;
use crate::helpers::resolve_password;
use crate::ui::{receipt, OutputMode, StepList};

pub fn handle_build(ctx: &AppContext, args: &SealArgs) -> anyhow::Result<()> {
    let password = resolve_password(&args.password, true)?;
    validate_password(&password)?;

    let paths = ctx.resolve_paths(args.input.as_deref(), &args.artifacts)?;
    let document = open_document(&paths.input)?;
    let ui = ctx.ui();

    let mut steps = StepList::new(ui, &Stage::BUILD);
    steps.start("Building");
    let report = Pipeline::new(password, paths.store())?
        .with_observer(&mut steps)
        .run(&document)?;

    if ui.quiet {
        return Ok(());
    }

    match ui.mode {
        OutputMode::Json => {
            let stages: Vec<&str> = report.stages.iter().map(|s| s.name()).collect();
            let output = json!({
                "status": "ok",
                "input": paths.input.display().to_string(),
                "ciphertext": paths.ciphertext.display().to_string(),
                "record": paths.record.display().to_string(),
                "plaintext_bytes": report.plaintext_len,
                "ciphertext_bytes": report.ciphertext_len,
                "stages": stages,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputMode::Pretty | OutputMode::Plain => {
            if ui.mode.is_pretty() {
                println!();
            }
            println!(
                "{}",
                receipt(
                    ui,
                    "Artifact built and verified",
                    &[
                        ("Ciphertext", paths.ciphertext.display().to_string()),
                        ("Record", paths.record.display().to_string()),
                        ("Plaintext bytes", report.plaintext_len.to_string()),
                        ("Ciphertext bytes", report.ciphertext_len.to_string()),
                    ],
                )
            );
        }
    }
    Ok(())
}
