//! QDL core: turns a URL (and optionally a file name) into a confirmed,
//! dispatched background download.

pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod form;
pub mod gate;
pub mod logging;
pub mod prefs;
pub mod session;
pub mod status;
pub mod transfer;
pub mod url_model;
