//! Line rendering shared by every command.

use owo_colors::{OwoColorize, Style};

use super::context::UiContext;
use super::theme::{dim, Badge};

/// Apply `style` only when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a summary block after an action.
///
/// Pretty mode: badge plus indented key-value pairs
/// Plain mode: `status=ok` plus key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            mode,
            quiet: false,
        }
    }

    #[test]
    fn test_kv_plain_is_snake_case() {
        assert_eq!(kv(&ctx(OutputMode::Plain), "Record path", "a.json"), "record_path=a.json");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(
            &ctx(OutputMode::Plain),
            "Built",
            &[("bytes", "42".to_string())],
        );
        assert_eq!(out, "status=ok\nbytes=42");
    }

    #[test]
    fn test_badge_without_color_has_no_escapes() {
        let out = badge(&ctx(OutputMode::Pretty), Badge::Ok, "done");
        assert_eq!(out, "[OK] done");
    }
}
