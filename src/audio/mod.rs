// Audio module - sample rate reading and batch rate checks

pub mod sample_rate;
pub mod uniformity;

pub use sample_rate::{get_sample_rate, SampleRate};
pub use uniformity::{distinct_sample_rates, is_same_sample_rate};
