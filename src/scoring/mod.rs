pub mod aggregate;
pub mod align;
pub mod decisions;
pub mod metrics;
pub mod overlap;
pub mod regions;
pub mod segmentation;
