pub mod terrain;
pub mod weather;

pub use terrain::{Clearing, Pond, Terrain};
pub use weather::{Weather, WeatherState};
