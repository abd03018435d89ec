pub mod scroll_lock;
pub mod storage;
pub mod theme;
