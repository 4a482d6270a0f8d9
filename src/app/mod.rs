pub mod action;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod focus;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod options;
pub mod overlay;
pub mod path_format;
pub mod reducer;
pub mod state;
pub mod ui;
