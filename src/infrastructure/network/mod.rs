pub mod deepl;
pub mod google;
pub mod http;
pub mod libre;
pub mod local;
pub mod mock;
pub mod registry;
