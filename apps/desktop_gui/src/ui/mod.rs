//! UI layer for desktop GUI: app shell, pages and widgets.

pub mod app;
mod auth;
mod departments;
mod details;
mod widgets;

pub use app::DeptAdminApp;
