pub mod anchor;
pub mod values;
pub mod vehicle;
