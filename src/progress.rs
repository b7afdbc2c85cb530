//! Progress indicators for the kafkaform CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for a single step of unknown length, such as a listing
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("template known to be valid"),
    );
    pb.set_message(msg.to_string());
    pb
}

/// Bar for `len` steps
pub fn bar(len: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("template known to be valid")
            .progress_chars("=>-"),
    );
    pb.set_message(msg.to_string());
    pb
}
