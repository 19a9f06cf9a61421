pub mod aligned_interval;
pub mod alignment_policy;
pub mod depth_index;
pub mod sampler;
