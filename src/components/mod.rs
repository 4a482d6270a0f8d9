pub mod footer;
pub mod header;
pub mod helpers;
pub mod palette;
pub mod workspace;
