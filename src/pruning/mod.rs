//! The pruning engine.
//!
//! Decides, for a loaded assembly, which symbols survive, which are deleted and which keep
//! their shape with an empty stub body. Decisions come from layered rules: explicit lists
//! from the policy, visibility, obsolete markers and signature reachability. Removing one
//! symbol can force removal of others, so every decision flows through a shared
//! [`RemovedTypeRegistry`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         AssemblyPruner                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  entry check → rename → TypeIndex snapshot                       │
//! │           │                                                      │
//! │           ▼  per module                                          │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │ Type pass (post-order)                                     │  │
//! │  │  top-level types: lists, visibility, attribute exception,  │  │
//! │  │  obsolete; nested types innermost first                    │  │
//! │  │  → RemovedTypeRegistry complete                            │  │
//! │  └──────────────────────────────┬─────────────────────────────┘  │
//! │                                 ▼                                │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │ Member pass (every surviving type, nested included)        │  │
//! │  │  interfaces → methods → fields → events → properties       │  │
//! │  │  → stub bodies in reference mode                           │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Components
//!
//! - [`AssemblyPruner`] - two-pass driver over one assembly
//! - [`RemovalSet`] - explicit list decisions, soft or forced
//! - [`SignatureChecker`] - signature reachability against removed and hidden types
//! - [`find_implementation`] - locates the method implementing an interface method
//! - [`PruneStats`] - counters of a run
//!
//! # Example
//!
//! ```rust
//! use dotprune::pruning::{member_full_name, RemovalSet, Removal};
//! use dotprune::config::Mode;
//!
//! let listed = vec![member_full_name("Contoso.Widget", "System.Void Reset()")?];
//! let set = RemovalSet::resolve(Mode::Remove, listed, Vec::new);
//! assert_eq!(set.get("System.Void Contoso.Widget::Reset()"), Some(Removal::Forced));
//! # Ok::<(), dotprune::Error>(())
//! ```

mod context;
mod decisions;
mod engine;
mod interfaces;
mod members;
mod nested;
mod obsolete;
mod reachability;
mod stats;
mod transform;
mod visibility;

pub use context::{PruneContext, RemovedTypeRegistry};
pub use decisions::{member_full_name, member_full_names, nested_full_name, Removal, RemovalSet};
pub use engine::AssemblyPruner;
pub use interfaces::{find_implementation, prune_interfaces, InterfaceCascade};
pub use members::prune_members;
pub use nested::{is_attribute_type, prune_nested, prune_types, MAX_BASE_DEPTH};
pub use obsolete::{is_obsolete, EMBEDDED_REFERENCES_MESSAGE};
pub use reachability::SignatureChecker;
pub use stats::PruneStats;
pub use transform::{rename_assembly, stub_body};
pub use visibility::{is_api_visible, member_is_api_visible, type_is_api_visible};
