pub mod case;
pub mod component;
pub mod config;
pub mod question;
pub mod template;
pub mod utils;
