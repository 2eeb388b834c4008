#![allow(dead_code)]

pub mod file_server;
pub mod recording_toaster;
