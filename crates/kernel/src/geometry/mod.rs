pub mod curves;
pub mod plane;
pub mod point;
pub mod transform;
pub mod vector;
