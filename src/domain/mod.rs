pub mod keywords;
pub mod model;
