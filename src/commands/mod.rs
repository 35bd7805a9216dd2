//! CLI commands for qu

pub mod dispatch;
pub mod format;
pub mod ideas;
pub mod init;
pub mod lifecycle;
pub mod tags;
pub mod working;
