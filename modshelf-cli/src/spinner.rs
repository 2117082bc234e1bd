//! Spinner bound to a page's loading flag.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use modshelf_lib::PageEvent;

/// A single spinner that runs while the page reports `loading`.
pub(crate) struct LoadingSpinner {
    pb: ProgressBar,
}

impl LoadingSpinner {
    /// When `quiet` is true the spinner is never drawn.
    pub(crate) fn new(quiet: bool, msg: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.set_message(msg.to_string());
        Self { pb }
    }

    /// Page listener that starts and clears the spinner.
    pub(crate) fn listener(&self) -> Box<dyn FnMut(&PageEvent)> {
        let pb = self.pb.clone();
        Box::new(move |event: &PageEvent| {
            if let PageEvent::LoadingChanged(loading) = event {
                if *loading {
                    pb.reset();
                    pb.enable_steady_tick(Duration::from_millis(100));
                } else {
                    pb.disable_steady_tick();
                    pb.finish_and_clear();
                }
            }
        })
    }

    pub(crate) fn start(&self) {
        self.pb.enable_steady_tick(Duration::from_millis(100));
    }

    pub(crate) fn clear(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.pb.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_loading_events() {
        let spinner = LoadingSpinner::new(true, "Searching...");
        let mut listener = spinner.listener();

        listener(&PageEvent::LoadingChanged(true));
        assert!(!spinner.is_finished());

        listener(&PageEvent::ResultsReplaced(3));
        assert!(!spinner.is_finished());

        listener(&PageEvent::LoadingChanged(false));
        assert!(spinner.is_finished());
    }
}
