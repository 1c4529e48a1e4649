//! pose-collector library crate.
//!
//! Records labeled yoga pose examples from a webcam: a countdown-driven
//! capture session in the terminal, MoveNet landmark estimation, and
//! per-example directories of images and landmark JSON.

pub mod ascii;
pub mod camera;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod pose;
pub mod session;
pub mod terminal;
pub mod writer;

pub use error::CollectorError;
