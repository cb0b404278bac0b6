/// Console adapters for the user-facing log
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
