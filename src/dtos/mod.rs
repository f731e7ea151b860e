pub mod user;
pub mod category;
pub mod session;
pub mod history;
pub mod admin;
