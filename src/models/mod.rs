pub mod disk;
pub mod net;
pub mod process;
pub mod snapshot;
pub mod speedtest;
