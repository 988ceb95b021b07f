pub mod picker;
pub mod scan;
