//! duckpad core logic.
//!
//! Everything that can run without hardware lives here: menu state,
//! button debouncing, directory browsing, script parsing and playback,
//! and the navigation controller that ties them together. Hardware is
//! reached only through the traits in [`input`], [`storage`],
//! [`render`], [`hid`] and [`power`]; the `board` module provides the
//! nRF52840 implementations behind the `embedded` feature.
//!
//! Host tests: `cargo test`
//! Firmware: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod browse;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod hid;
pub mod input;
pub mod menu;
pub mod power;
pub mod render;
pub mod script;
pub mod storage;

#[cfg(feature = "embedded")]
pub mod board;

#[cfg(test)]
mod testutil;
