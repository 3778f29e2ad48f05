pub mod auth;
pub mod config;
pub mod credential;
pub mod email;
pub mod http;
pub mod oauth;
pub mod persistence;
