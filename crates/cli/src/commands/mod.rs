pub mod predict;
pub mod recommend;
pub mod train;
