pub mod aggregate;
pub mod config;
pub mod launcher;
pub mod render;

mod server;
pub use server::{
    router, start_server, Problem, State, COUNTER_STRIKE, LEAGUE_OF_LEGENDS, TOP_STREAMS,
};
