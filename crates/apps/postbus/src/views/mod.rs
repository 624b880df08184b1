//! Console views

pub mod message_list;
