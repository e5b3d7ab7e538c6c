pub mod active_session;
pub mod location;
pub mod shift;
pub mod user;

pub use active_session::ActiveSession;
pub use location::GeoPoint;
pub use shift::{Shift, build_shift};
pub use user::{User, build_user};
