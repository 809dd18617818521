//! API client for the OneBook service

pub mod onebook;
