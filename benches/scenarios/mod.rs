//! Full-pipeline benchmarks.
//!
//! These model the realtime callback: a control snapshot per block, then
//! strictly per-sample analysis and synthesis.

mod pipeline;

pub use pipeline::bench_pipeline;
