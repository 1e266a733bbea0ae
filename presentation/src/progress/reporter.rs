//! Progress reporting while the invoker walks the fallback chain

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tribunal_application::ports::progress::InvocationProgress;
use tribunal_domain::Model;

/// Spinner showing the current model and attempt
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        let bar = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_prefix("Adjudicating");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(bar);
    }

    fn finish(&self, message: String) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationProgress for ProgressReporter {
    fn on_attempt(&self, model: &Model, attempt: u32, max_attempts: u32) {
        self.with_bar(|pb| pb.set_message(format!("{} (attempt {}/{})", model, attempt, max_attempts)));
    }

    fn on_retry_scheduled(&self, model: &Model, delay: Duration, error: &str) {
        self.with_bar(|pb| {
            pb.set_message(format!(
                "{} {} retrying in {}ms: {}",
                "!".yellow(),
                model,
                delay.as_millis(),
                error
            ))
        });
    }

    fn on_model_exhausted(&self, model: &Model, error: &str) {
        self.with_bar(|pb| pb.println(format!("  {} {} ({})", "x".red(), model, error)));
    }

    fn on_success(&self, model: &Model) {
        self.finish(format!("{} {}", "v".green(), model));
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl InvocationProgress for SimpleProgress {
    fn on_attempt(&self, model: &Model, attempt: u32, max_attempts: u32) {
        eprintln!(
            "{} {} (attempt {}/{})",
            "->".cyan(),
            model,
            attempt,
            max_attempts
        );
    }

    fn on_model_exhausted(&self, model: &Model, _error: &str) {
        eprintln!("  {} {} (failed)", "x".red(), model);
    }

    fn on_success(&self, model: &Model) {
        eprintln!("  {} {}", "v".green(), model);
    }
}
