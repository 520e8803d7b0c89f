//! Average, naive linear trend and forward projection of numeric series.
//!
//! The core is [`forecast()`], a pure function. [`ForecastService`] is the
//! contract a host binds to, and [`Manager`] drives batches of series stored
//! in a job directory.

pub mod config;
pub mod forecast;
pub mod manager;
pub mod service;

pub use crate::forecast::{Forecast, forecast};
pub use crate::manager::Manager;
pub use crate::service::{BoxedForecastService, ForecastService, LinearForecaster};
