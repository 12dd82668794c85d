pub mod diagnostic;
pub mod effect;
pub mod material;
pub mod polylist;
pub mod scene;
pub mod shared;
pub mod source;
