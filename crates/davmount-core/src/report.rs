//! User-facing error reporting. Called at most once per run.

pub trait ErrorReporter: Send + Sync {
    fn report_error(&self, primary: &str, secondary: Option<&str>);
}

/// Prints `primary: secondary` to stderr and logs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

pub(crate) fn format_report(primary: &str, secondary: Option<&str>) -> String {
    match secondary {
        Some(s) if !s.is_empty() => format!("{}: {}", primary, s),
        _ => primary.to_string(),
    }
}

impl ErrorReporter for StderrReporter {
    fn report_error(&self, primary: &str, secondary: Option<&str>) {
        let message = format_report(primary, secondary);
        tracing::error!("{}", message);
        eprintln!("davmount: {}", message);
    }
}
