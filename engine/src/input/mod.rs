//! Input Module
//!
//! Platform-agnostic pointer input. Decoupled from any windowing system:
//! the host translates its own press/move/release events into
//! [`PointerEvent`]s and hands them to the simulation.
//!
//! # Example
//!
//! ```rust,ignore
//! use axe_toss_engine::input::{ChargeState, normalized_charge};
//!
//! let mut charge = ChargeState::new();
//! charge.press(0.0);
//! let held = charge.release(0.48).unwrap();
//! let t = normalized_charge(held, 0.06, 0.9); // 0.5
//! ```

pub mod pointer;

pub use pointer::{ChargeState, PointerEvent, normalized_charge};
