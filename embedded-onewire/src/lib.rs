#![no_std]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std description of the 1-Wire protocol for single-drop buses.
//!
//! This crate provides a trait-based interface for 1-Wire communication, allowing you to implement the protocol on various bus masters.
//! [OneWireAsync] defines the basic operations required for 1-Wire communication, such as resetting the bus, writing and reading bytes, and writing and reading bits,
//! and builds the generic ROM-level transactions (Read ROM, Skip ROM) on top of them.
//!
//! The crate also provides the Dallas/Maxim CRC-8 used to protect every frame on the bus ([OneWireCrc], [crc8]),
//! the [RomCode] identifying a device, and the [OneWireError] taxonomy shared by all bus implementations.

pub mod consts;
mod error;
mod rom;
mod traits;
mod traits_async;
mod utils;
pub use consts::{ONEWIRE_READ_ROM_CMD, ONEWIRE_SKIP_ROM_CMD};
pub use error::OneWireError;
pub use rom::RomCode;
pub use traits::OneWireStatus;
pub use traits_async::OneWireAsync;
pub use utils::{OneWireCrc, crc8};

/// Error type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
