use async_trait::async_trait;
use std::time::Duration;

/// Source of delays for debounced work
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// `setTimeout`-backed timer for the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Timer on tokio's clock, so tests can run with a paused clock
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(test)]
#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
