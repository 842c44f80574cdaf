//! UI module for step output
//!
//! Uses `cliclack` for styled output in interactive terminals, with
//! plain tagged lines (`ok`, `warn`, `note`) on CI runners.
//!
//! # Example
//!
//! ```rust,ignore
//! use setup_esbuild::ui::{self, UiContext, InstallProgress};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "setup-esbuild");
//! let progress = InstallProgress::new(&ctx, "0.24.0");
//! // ... feed install script output through progress.on_line ...
//! progress.finish();
//! ui::step_ok_detail(&ctx, "Cached esbuild", "/cache/esbuild/0.24.0/x64");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, remark, step_ok, step_ok_detail, step_warn_hint,
};
pub use progress::InstallProgress;
