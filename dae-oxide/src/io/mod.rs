pub mod dae;
pub mod xml;
