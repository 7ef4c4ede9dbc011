//! Availability checking and the unified scheduling view.
//!
//! Everything here is a pure function over bookings the caller has
//! already fetched and scoped: the conflict check that gates booking
//! creation, the day-grid occupancy view across heterogeneous
//! resources, and the "when is this free?" query.

mod conflict;
pub use conflict::{Conflict, check_availability};

mod occupancy;
pub use occupancy::{OccupiedSlot, ResourceOccupancy, daily_occupancy};

mod window;
pub use window::{Availability, next_available_window};
