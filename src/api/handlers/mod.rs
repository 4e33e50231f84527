pub mod bookings;
pub mod health;
pub mod jwt;
pub mod services;
