const TOLERANCE: f64 = 1e-9;

pub(crate) trait TestHelper<T> {
    fn assert_approx_eq(&self, expected: T);
}

impl TestHelper<f64> for f64 {
    fn assert_approx_eq(&self, expected: f64) {
        assert!(
            (self - expected).abs() < TOLERANCE,
            "{self} is not approximately {expected}"
        );
    }
}

impl<const N: usize> TestHelper<[f64; N]> for [f64] {
    fn assert_approx_eq(&self, expected: [f64; N]) {
        assert_eq!(self.len(), N, "{self:?} vs {expected:?}");
        for (actual, expected) in self.iter().zip(expected) {
            actual.assert_approx_eq(expected);
        }
    }
}

/// Routes `log` output to stdout for the current test binary.
pub(crate) fn init_logging() {
    let _ = fern::Dispatch::new()
        .level(log::LevelFilter::Trace)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .chain(std::io::stdout())
        .apply();
}
