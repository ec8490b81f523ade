/// Milliseconds on a monotonic-enough clock. The browser only offers
/// `Date.now()` without pulling in `web-sys` Performance.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the first reading in this process
#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Wall time of one solver stage
#[derive(Clone, Copy, Debug)]
pub(crate) struct PerfTimer {
    started_ms: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        Self { started_ms: now_ms() }
    }

    /// `None` when perf collection is off, so stages skip the clock read
    pub(crate) fn start_if(enabled: bool) -> Option<Self> {
        enabled.then(Self::start)
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        // Date.now() can step backwards when the system clock is adjusted
        (now_ms() - self.started_ms).max(0.0)
    }
}
