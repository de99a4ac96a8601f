pub mod app_config;
pub mod booking_repo;
pub mod checkout;
pub mod database;
pub mod mailer;
pub mod memory_repo;

pub use app_config::Config;
pub use booking_repo::PgBookingRepository;
pub use checkout::StripeClient;
pub use database::DbClient;
pub use mailer::HttpMailer;
pub use memory_repo::InMemoryBookingRepository;
