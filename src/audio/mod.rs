pub mod output;
pub mod player;
pub mod playlist;
