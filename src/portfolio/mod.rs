pub mod catalog;
pub mod filter;
pub mod gallery;
pub mod media;
pub mod modal;
pub mod player;
pub mod viewer;
