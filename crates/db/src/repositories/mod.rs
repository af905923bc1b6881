pub mod chat_file_repo;
pub mod chat_repo;
pub mod invoice_repo;
pub mod message_repo;
pub mod portfolio_repo;
pub mod service_repo;
pub mod user_repo;

pub use chat_file_repo::ChatFileRepo;
pub use chat_repo::ChatRepo;
pub use invoice_repo::InvoiceRepo;
pub use message_repo::MessageRepo;
pub use portfolio_repo::PortfolioRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
