pub mod playlist;
pub mod ring;
pub mod timer;
