//! Force-directed topic cluster visualization.

mod build;
mod component;
mod render;
mod sim;
mod state;
mod types;
mod view;

pub use component::ClusterGraphCanvas;
