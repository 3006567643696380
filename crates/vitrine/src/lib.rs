pub mod carousel;
pub mod config;
pub mod events;
pub mod gui;
pub mod preferences;
pub mod sys;
