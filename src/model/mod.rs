pub mod user;
pub mod gift;
pub mod announcement;
pub mod exchange_date;
