//! Device under test

pub mod block;

pub use block::BlockDevice;
pub(crate) use block::{DeviceProbe, FsProbe};
