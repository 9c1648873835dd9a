#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod backup;
pub mod images;
pub mod items;
pub mod mala;
