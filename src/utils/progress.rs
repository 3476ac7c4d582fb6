use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the dataset loads. Dropping the reporter finishes
/// the spinner if it is still ticking.
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { spinner: pb }
    }

    pub fn finish_with_message(&self, message: &str) {
        self.spinner.finish_with_message(message.to_string());
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish();
        }
    }
}
