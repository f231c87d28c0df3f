//! Awww Core - input and value primitives for audio plugin widgets
//!
//! This crate holds the pieces every widget shares, independent of how the
//! widget is drawn or which host it talks to.
//!
//! # Core Abstractions
//!
//! ## Gesture Unification
//!
//! - [`GestureUnifier`] - Merges touch, mouse and wheel input into one
//!   `start → continue* → end` stream of [`ControlEvent`]s
//! - [`PointerCapture`] - Scoped global pointer subscription held while a
//!   mouse gesture is active
//!
//! ## Value Scaling
//!
//! - [`Scale`] - Linear, logarithmic or decibel mapping
//! - [`normalize`] / [`denormalize`] - Pure conversions between the \[0, 1\]
//!   control space and the domain range
//! - [`ValueRange`] - `min`, `max` and scale bundled together
//!
//! ## Options
//!
//! - [`OptionDescriptor`] - Per-widget-type table of recognized keys
//! - [`OptionSet`] - Per-instance option store with alias resolution and a
//!   re-entrancy guarded update protocol
//! - [`parse_bool`], [`parse_int`], [`parse_float`], [`parse_str`] - Attribute
//!   parsers that fall back to a default instead of failing
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the option store).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! awww-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use awww_core::{ControlPhase, DeviceEvent, GestureUnifier, Modifiers, Scale, normalize};
//!
//! let mut unifier = GestureUnifier::new(());
//! let dispatch = unifier.handle(
//!     DeviceEvent::Wheel {
//!         x: 10.0,
//!         y: 10.0,
//!         delta_x: 0.0,
//!         delta_y: -3.0,
//!         modifiers: Modifiers::NONE,
//!         inverted: false,
//!     },
//!     Duration::ZERO,
//! );
//! let phases: Vec<ControlPhase> = dispatch.iter().map(|ev| ev.phase).collect();
//! assert_eq!(phases, [ControlPhase::Start, ControlPhase::Continue]);
//!
//! assert_eq!(normalize(Scale::Linear, 5.0, 0.0, 10.0), 0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod gesture;
pub mod options;
pub mod parse;
pub mod range;
pub mod scale;

pub use gesture::{
    ControlEvent, ControlPhase, DeviceEvent, Dispatch, GestureUnifier, InputSource, Modifiers,
    PRIMARY_BUTTON, PointerCapture, WHEEL_GESTURE_TIMEOUT,
};
pub use options::{OptionDescriptor, OptionKind, OptionSet, OptionValue};
pub use parse::{parse_bool, parse_float, parse_int, parse_str};
pub use range::ValueRange;
pub use scale::{Scale, clamp, clamp_normalized, denormalize, normalize};
