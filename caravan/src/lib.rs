pub use caravan::*;
pub use cards::*;
pub use config::*;
pub use errors::*;
pub use input::*;
pub use player::*;
pub use round::*;
pub use selection::*;
pub use table::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod caravan;
mod cards;
mod config;
mod errors;
mod input;
mod player;
mod round;
mod selection;
mod table;
mod visualization;
