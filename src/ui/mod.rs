pub mod app;
pub mod table_view;

pub use app::PanelApp;
