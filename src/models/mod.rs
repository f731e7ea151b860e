pub mod user;
pub mod category;
pub mod session;
