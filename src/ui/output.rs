//! Step output for the install flow
//!
//! On a terminal each line goes through `cliclack`. On a runner the same
//! line is printed plain with a fixed-width tag, so job logs stay greppable.

use super::context::UiContext;
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Ok,
    Warn,
    Note,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Ok => "ok",
            Tone::Warn => "warn",
            Tone::Note => "note",
        }
    }
}

/// Plain runner line: tag padded to a column, then the message
fn plain_line(tone: Tone, message: &str) -> String {
    format!("  {:<5} {}", tone.tag(), message)
}

fn emit(ctx: &UiContext, tone: Tone, message: String) {
    if ctx.use_fancy_output() {
        let _ = match tone {
            Tone::Ok => cliclack::log::success(message),
            Tone::Warn => cliclack::log::warning(message),
            Tone::Note => cliclack::log::remark(message),
        };
        return;
    }

    let line = plain_line(tone, &message);
    match tone {
        Tone::Ok => println!("{}", style(line).green()),
        Tone::Warn => println!("{}", style(line).yellow()),
        Tone::Note => println!("{}", style(line).dim()),
    }
}

/// Open the run with the tool banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        let _ = cliclack::intro(style(title).cyan().bold());
    } else {
        println!("==> {}", style(title).bold());
    }
}

/// Close the run after everything succeeded
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        let _ = cliclack::outro(style(message).green().bold());
    } else {
        println!("==> {}", style(message).green());
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    emit(ctx, Tone::Ok, message.to_string());
}

/// Completed step with a path or value after it
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    emit(ctx, Tone::Ok, format!("{}: {}", message, detail));
}

/// Something the user should fix, with the fix
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    emit(ctx, Tone::Warn, format!("{} ({})", message, hint));
}

pub fn remark(ctx: &UiContext, message: &str) {
    emit(ctx, Tone::Note, message.to_string());
}

/// Value the user may copy, printed without a tag
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {} {}", style(format!("{}:", key)).dim(), value);
    } else {
        println!("        {}={}", key, value);
    }
}
