pub mod app;
pub mod dims;
pub mod logging;
pub mod maze;
pub mod settings;
pub mod ui;
