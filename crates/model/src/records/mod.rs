pub mod row;
pub mod transformed;
