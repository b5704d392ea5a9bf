pub mod export;
pub mod init;
pub mod task;
pub mod tracker;
pub mod user;
