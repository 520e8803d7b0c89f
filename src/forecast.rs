use serde::{Deserialize, Serialize};

/// Result of a forecast.
///
/// Serializes to a map with the keys `forecast`, `avg`, `trend` and `period`.
/// The `period` key is left out when the input series was empty.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Projected values, one per requested step.
    pub forecast: Vec<f64>,
    /// Arithmetic mean of the input series.
    pub avg: f64,
    /// Naive slope: (last - first) / number of values.
    pub trend: f64,
    /// Period hint echoed from the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
}

impl Forecast {
    /// Zeroed result returned for an empty input series.
    pub fn empty() -> Self {
        Self {
            forecast: Vec::new(),
            avg: 0.0,
            trend: 0.0,
            period: None,
        }
    }

    /// Render the result as the JSON map a host receives.
    ///
    /// JSON has no NaN or infinity, so non-finite values are rendered as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::json!({
            "forecast": self.forecast,
            "avg": self.avg,
            "trend": self.trend,
        });
        if let Some(period) = self.period {
            map["period"] = serde_json::json!(period);
        }
        map
    }
}

/// Compute the average and naive trend of `data` and project it `steps` steps ahead.
///
/// The k-th projected value (k = 1..=steps) is `avg + trend * k`.
/// A non-positive `steps` gives an empty projection. `period` is not used by
/// the computation and is echoed back unchanged.
///
/// Non-finite values in `data` are not rejected and propagate into the result.
pub fn forecast(data: &[f64], steps: i64, period: i64) -> Forecast {
    let (Some(&first), Some(&last)) = (data.first(), data.last()) else {
        return Forecast::empty();
    };

    let n_vals = data.len() as f64;
    let avg = data.iter().sum::<f64>() / n_vals;
    let trend = (last - first) / n_vals;

    let forecast = (1..=steps).map(|k| avg + trend * k as f64).collect();

    Forecast {
        forecast,
        avg,
        trend,
        period: Some(period),
    }
}
