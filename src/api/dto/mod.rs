pub mod bookings;
pub mod services;
pub mod token;
