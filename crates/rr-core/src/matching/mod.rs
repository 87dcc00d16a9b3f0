pub mod feedback;
pub mod pipeline;
pub mod scoring;
pub mod skills;
pub mod weights;
