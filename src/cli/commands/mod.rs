pub mod artifact;
pub mod tenant;
pub mod token;
