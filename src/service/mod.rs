pub mod user_service;
pub mod gift_service;
pub mod announcement_service;
pub mod exchange_date_service;
