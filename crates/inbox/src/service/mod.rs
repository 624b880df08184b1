//! Message backend access
//!
//! This module provides:
//! - The `MessageService` trait used by the controller
//! - An HTTP implementation talking to the REST backend
//! - An in-memory implementation for tests and demo mode

mod client;
mod memory;
mod traits;

pub use client::HttpMessageService;
pub use memory::{InMemoryMessageService, ServiceCall};
pub use traits::MessageService;
