//! One view module per route

pub mod home;
pub mod markdown;
pub mod settings;
pub mod sidebar;
pub mod todo;
