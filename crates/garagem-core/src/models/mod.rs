//! Domain models

mod car;

pub use car::{licence_display_label, Car, CarDetail, CarId};
