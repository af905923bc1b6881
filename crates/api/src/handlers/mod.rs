pub mod auth;
pub mod chat;
pub mod invoice;
pub mod portfolio;
pub mod service;
pub mod user;
