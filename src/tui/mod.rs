pub mod detail_overlay;
pub mod footer;
pub mod grid;
pub mod header;
pub mod plain;
pub mod render;
pub mod style;
