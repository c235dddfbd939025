//! # Core Text Logic
//!
//! Everything Chirp knows about post text, independent of any UI.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • segment (data model) │
//!                    │  • segmenter            │
//!                    │  • extract              │
//!                    │  • autocomplete         │
//!                    │                         │
//!                    │  No shared state. Pure. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    CLI     │      │   React    │      │  Backend   │
//!     │  Adapter   │      │  renderer  │      │  indexing  │
//!     │   (clap)   │      │  (JSON)    │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`segment`]: `Segment`, a typed slice of text (text / mention / hashtag)
//! - [`roster`]: `RosterUser` and the per-call username lookup table
//! - [`segmenter`]: `segment_mentions`, `segment_hashtags`, `render_segments`
//! - [`extract`]: distinct mentions/hashtags for indexing and notifications
//! - [`autocomplete`]: `@` suggestion popup logic for the composer
//! - [`config`]: `~/.chirp/config.toml` loading and resolution

pub mod autocomplete;
pub mod config;
pub mod extract;
pub mod roster;
pub mod segment;
pub mod segmenter;
