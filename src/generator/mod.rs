pub mod context;
pub mod outlet;
pub mod stages;
pub mod state;
pub mod workflow;
