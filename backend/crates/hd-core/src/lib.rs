pub mod clock;
pub mod composition_mode;
pub mod tenant;

pub use clock::{Clock, ManualClock, SystemClock};
pub use composition_mode::CompositionMode;
pub use error_location::ErrorLocation;
pub use tenant::Tenant;
