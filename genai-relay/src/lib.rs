pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod providers;
pub mod services;
pub mod startup;
