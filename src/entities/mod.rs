pub mod adventure_type;
pub mod booking;
pub mod hidden_gem;
pub mod hidden_gem_adventure_type;
pub mod hidden_gem_bookmark;
pub mod state;
pub mod user;
pub mod vehicle;
