pub mod app_state;
pub mod notice;
pub mod settings;
pub mod theme;
