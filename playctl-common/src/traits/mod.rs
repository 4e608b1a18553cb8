pub mod player_traits;

pub use player_traits::PlayerSink;
