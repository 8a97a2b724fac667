pub mod ack;
pub mod attend;
pub mod calendar;
pub mod config;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod site;
pub mod status;
pub mod user;
