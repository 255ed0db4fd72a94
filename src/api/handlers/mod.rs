pub mod health;
pub mod items;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod users;
