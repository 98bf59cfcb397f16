mod command;
mod library;
mod run;
mod state;
mod types;

pub use state::App;
