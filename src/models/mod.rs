pub mod currency;
pub mod haircut;
pub mod rating;

pub use currency::Currency;
pub use haircut::{Cost, GeoLocation, HaircutFields, HaircutRecord, MAX_IMAGES};
