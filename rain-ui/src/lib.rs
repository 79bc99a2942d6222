pub mod app;
pub mod config;
pub mod contact_form;
pub mod controller;
pub mod form;
pub mod logging;
pub mod map;
pub mod ports;
pub mod renderer;
pub mod report;
pub mod scheduler;
pub mod share_actions;
pub mod terminal;
pub mod utils;
