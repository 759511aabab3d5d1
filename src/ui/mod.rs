pub mod bubble;
pub mod carousel;
pub mod footer;
pub mod format;
pub mod header;
pub mod typing;
