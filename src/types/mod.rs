pub mod method;
pub mod push;
pub mod timings;

pub use method::CalculationMethod;
pub use push::{PushMessage, PushNotification};
pub use timings::{DisplayTime, PrayerSet, Timings, format_to_12h};
