pub mod chat;
pub mod invoice;
pub mod portfolio;
pub mod service;
pub mod status;
pub mod user;
