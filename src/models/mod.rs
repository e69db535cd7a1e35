pub mod panel;

pub use panel::{Row, Table};
