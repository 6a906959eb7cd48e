//! Benchmarks for individual pipeline stages.

mod drum;
mod follower;
mod onset;
mod spectral;

pub use drum::bench_drum;
pub use follower::bench_follower;
pub use onset::bench_onset;
pub use spectral::bench_spectral;
