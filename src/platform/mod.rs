//! Concrete [`ContainerPlatform`](crate::core::platform::ContainerPlatform)
//! implementations.

pub mod memory;

pub use memory::InMemoryPlatform;
