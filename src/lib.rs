pub mod align;
pub mod alignment;
pub mod calculator;
pub mod config;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod model;
pub mod modify;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod score;
