pub mod config;
pub mod rounds;
pub mod runner;
