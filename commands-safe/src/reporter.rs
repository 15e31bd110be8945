//! 故障上报回调（Reporting Callback）
//!
use std::fmt;
use std::sync::Arc;

type ReportFn = dyn Fn(anyhow::Error) -> bool + Send + Sync;

/// 故障上报回调
///
/// - 在装饰层构造时提供一次，之后不可变；
/// - 可能被多个命令在不同线程上并发调用，实现方需自行保证可重入；
/// - 返回值表示回调是否“已处理”，仅供回调自身记录，装饰层不据此改变控制流。
#[derive(Clone)]
pub struct ErrorReporter {
    on_error: Arc<ReportFn>,
}

impl ErrorReporter {
    pub fn new<F>(on_error: F) -> Self
    where
        F: Fn(anyhow::Error) -> bool + Send + Sync + 'static,
    {
        Self {
            on_error: Arc::new(on_error),
        }
    }

    /// 以 `tracing` 的 error 级别记录故障，并视为已处理
    pub fn tracing() -> Self {
        Self::new(|err| {
            let error = format!("{err:#}");
            tracing::error!(error = %error, "command fault");
            true
        })
    }

    pub fn report(&self, err: anyhow::Error) {
        let handled = (self.on_error)(err);
        tracing::debug!(handled, "command fault reported");
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn report_invokes_callback_regardless_of_verdict() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let reporter = ErrorReporter::new(move |_err| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });

        reporter.report(anyhow::anyhow!("first"));
        reporter.clone().report(anyhow::anyhow!("second"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn tracing_reporter_does_not_panic_without_subscriber() {
        ErrorReporter::tracing().report(anyhow::anyhow!("ignored"));
    }
}
