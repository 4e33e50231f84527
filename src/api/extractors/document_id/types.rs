/**
 * Responsibility
 *  - One typed id per collection, so a booking id cannot be passed where a
 *    catalog id is expected
 *  - Tags and aliases only; parsing lives in core
 */
use super::core::DocumentId;

// services (catalog)
pub enum ServiceTag {}
pub type ServiceId = DocumentId<ServiceTag>;

// bookings
pub enum BookingTag {}
pub type BookingId = DocumentId<BookingTag>;
