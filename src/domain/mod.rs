pub mod models;
pub mod sources;
pub mod update;
