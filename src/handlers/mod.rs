pub mod adventure_types;
pub mod auth;
pub mod bookings;
pub mod bookmarks;
pub mod gems;
pub mod states;
pub mod vehicles;
