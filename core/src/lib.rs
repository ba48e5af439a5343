//! Lifecycle engine for lingering click tooltips.
//!
//! ```text
//!   key / click events ──▶ InputStateMachine ──▶ intents ─┐
//!                     │                                   ▼
//!                     └────▶ FilterEngine ──▶ TooltipQueue ──▶ RenderFrame
//!                                                  ▲               │
//!                                    fade (opacity)┘               ▼
//!                                                          render surface
//! ```
//!
//! [`TooltipEngine`] wires everything together for a host. The pieces are
//! public so they can be driven and tested on their own.

pub mod config;
pub mod engine;
pub mod error;
pub mod fade;
pub mod filter;
pub mod input;
pub mod queue;
pub mod tooltip;

pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore};
pub use engine::TooltipEngine;
pub use error::ConfigError;
pub use fade::{FadePhase, FadeProfile, Opacity};
pub use filter::{FilterEngine, FilterListUpdate, MetaNotification};
pub use input::{InputIntent, InputState, InputStateMachine, ModifierKey};
pub use queue::{RenderFrame, RenderItem, Slot, SubmitOutcome, TooltipQueue};
pub use tooltip::{Tooltip, TooltipId};
