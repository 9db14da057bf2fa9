pub mod chat;
pub mod cli;
