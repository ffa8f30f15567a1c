pub mod executor;
pub mod state;
