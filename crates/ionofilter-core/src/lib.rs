pub mod channels;
pub mod chrono_sort;
pub mod config;
pub mod error;
pub mod median;
pub mod pipeline;
pub mod sinks;
