//! Event-driven endpoint stack for OSNP, the Open Sensor Network Protocol.
//!
//! An [`Endpoint`] is driven entirely by three callbacks a platform
//! implementation calls into — [`Endpoint::frame_received_cb`],
//! [`Endpoint::frame_sent_cb`], [`Endpoint::timer_expired_cb`] — plus
//! [`Endpoint::poll`], which a platform may also call directly. Everything
//! the endpoint needs from the world (persisted identity, the radio,
//! timers, and the application command dispatcher) is supplied through a
//! single [`Driver`] implementation.
//!
//! There are no suspension points anywhere in this crate: every callback
//! runs to completion synchronously. The platform is responsible for
//! serializing calls into an [`Endpoint`] — from interrupt context or
//! otherwise — so that no two callbacks ever execute concurrently.
//!
//! ```
//! use osnp_endpoint::{Driver, Endpoint};
//!
//! struct NullDriver;
//!
//! impl Driver for NullDriver {
//!     fn load_eui(&mut self) -> [u8; 8] { [0; 8] }
//!     fn load_pan_id(&mut self) -> [u8; 2] { [0, 0] }
//!     fn load_short_address(&mut self) -> [u8; 2] { [0xff, 0xff] }
//!     fn load_channel(&mut self) -> u8 { 0xff }
//!     fn write_pan_id(&mut self, _pan_id: [u8; 2]) {}
//!     fn write_short_address(&mut self, _short_addr: [u8; 2]) {}
//!     fn write_channel(&mut self, _channel: u8) {}
//!     fn switch_channel(&mut self, _channel: u8) {}
//!     fn transmit_frame(&mut self, _frame: &[u8]) {}
//!     fn start_channel_scanning_timer(&mut self) {}
//!     fn start_association_wait_timer(&mut self) {}
//!     fn start_poll_timer(&mut self) {}
//!     fn start_pending_data_wait_timer(&mut self) {}
//!     fn stop_active_timer(&mut self) {}
//!     fn get_pending_frames(&mut self) -> bool { false }
//!     fn process_command(
//!         &mut self,
//!         _request: &[u8],
//!         _read_offset: &mut usize,
//!         _response: &mut [u8],
//!         _write_offset: &mut usize,
//!         _authenticated: bool,
//!     ) {
//!     }
//! }
//!
//! let endpoint = Endpoint::initialize(NullDriver, 0);
//! assert_eq!(endpoint.channel(), 0);
//! ```
#![allow(unused)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod utils;

pub mod constants;
mod data;
mod driver;
mod error;
mod identity;
mod mac_commands;
mod state;

pub use driver::Driver;
pub use error::Error;
pub use identity::Identity;
pub use state::{Endpoint, EndpointState};

/// A type alias for `Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests;
