pub mod audit;
pub mod brep;
pub mod builder;
