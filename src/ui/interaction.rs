pub mod events;
pub mod gesture;
pub mod transform;
