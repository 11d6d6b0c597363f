pub mod rotator;
pub mod scene;
pub mod transform;
