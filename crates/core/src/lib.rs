pub mod extraction;
pub mod geocoding;
pub mod path;
pub mod pipeline;
pub mod shared;
pub mod transcript;
