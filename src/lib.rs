pub mod analysis;
pub mod banner;
pub mod consts;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod events;
pub mod report;
pub mod spinner;
pub mod tasks;
