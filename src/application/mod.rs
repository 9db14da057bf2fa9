pub mod cascade;
pub mod detect;
pub mod direction;
pub mod pivot;
pub mod relay;
pub mod session;
