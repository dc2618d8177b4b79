use std::io::{self, Write};

use serde_json::json;
use sitecrypt_core::fs::write_atomic;
use sitecrypt_core::{Pipeline, Stage};

use crate::app::AppContext;
use crate::cli::DecryptArgs;
use crate::helpers::resolve_password;
use crate::ui::{badge, Badge, StepList, Stream};

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let password = resolve_password(&args.password, false)?;

    let paths = ctx.resolve_paths(None, &args.artifacts)?;
    let ui = ctx.ui();

    // stdout is reserved for the plaintext.
    let mut steps = StepList::new(ui, &Stage::OPEN).on_stream(Stream::Stderr);
    let plaintext = Pipeline::reopen(password, paths.store())?
        .with_observer(&mut steps)
        .open()?;

    let Some(output) = args.output.as_ref() else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&plaintext)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        return Ok(());
    };

    write_atomic(output, &plaintext)?;
    if ui.quiet {
        return Ok(());
    }
    if ui.mode.is_json() {
        let summary = json!({
            "status": "ok",
            "output": output.display().to_string(),
            "bytes": plaintext.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}",
            badge(ui, Badge::Ok, &format!("Wrote {}", output.display()))
        );
    }
    Ok(())
}
