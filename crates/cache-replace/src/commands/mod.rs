pub mod init;
pub mod marker;
pub mod render;
