pub mod format_hook;
pub mod hub;
pub mod init;
pub mod status;
pub mod verify;
