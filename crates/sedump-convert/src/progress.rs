//! Terminal progress for long conversions

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Rows between progress updates
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Spinner counting converted rows, or a hidden bar when `visible` is false
pub fn create_row_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {human_pos} rows {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Message shown next to the row count
pub fn chunk_message(table: &str, chunk: Option<u32>) -> String {
    match chunk {
        Some(chunk) => format!("{table}, writing chunk {chunk}"),
        None => format!("{table}, between chunks"),
    }
}
