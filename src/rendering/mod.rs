pub mod cameras;

pub use cameras::{BoardCamera, CameraPlugin};
