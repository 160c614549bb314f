pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod forecast;
pub mod panel;
pub mod pipeline;
#[cfg(test)]
pub mod test;
pub mod util {
    pub mod file_utils;
    pub mod metrics;
    pub mod model_logger;
    pub mod pre_processor;
}

/// Build-time package information generated by `built`
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use error::{ForecastError, Result};
