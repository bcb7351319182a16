pub mod controller;
pub mod gui;
pub mod logic;
pub mod model;
pub mod status;

pub use controller::PlotController;
pub use gui::App;
