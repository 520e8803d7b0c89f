use crate::forecast::{Forecast, forecast};

/// Contract a host binds to in order to request forecasts.
///
/// The trait is object safe and can be used as [`BoxedForecastService`].
pub trait ForecastService: Send + Sync {
    /// Project `data` forward `steps` steps, echoing `period` in the result.
    fn forecast(&self, data: &[f64], steps: i64, period: i64) -> Forecast;

    /// Short name of the implementation.
    fn name(&self) -> &str;
}

pub type BoxedForecastService = Box<dyn ForecastService>;

/// Average plus naive linear trend.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearForecaster;

impl ForecastService for LinearForecaster {
    fn forecast(&self, data: &[f64], steps: i64, period: i64) -> Forecast {
        forecast(data, steps, period)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
