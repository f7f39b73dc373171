//! Reusable view components.

pub mod cluster_graph;
pub mod custom_select;
pub mod glass_card;
pub mod keyword_list;
pub mod loaders;
pub mod prompt_table;
