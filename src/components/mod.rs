pub mod footer;
pub mod header;
pub mod scroll_to_top;
