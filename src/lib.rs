// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotprune
//!
//! Policy-driven pruning of .NET assembly metadata. `dotprune` takes the metadata graph of
//! an assembly and a declarative policy, and removes the types and members the policy names,
//! the obsolete ones, and everything whose signature can no longer be expressed once they
//! are gone. In reference mode it also strips the non-public surface and replaces every
//! method body with `throw null`, producing a reference assembly.
//!
//! ## Features
//!
//! - **📋 Declarative policies** - JSON documents with per-assembly, per-type and per-member rules
//! - **🔗 Cascading removal** - members mentioning removed or hidden types go with them
//! - **🧩 Interface cascades** - dropping an interface drops its implementing methods
//! - **📦 Reference assemblies** - API-only surface with stub bodies
//! - **⚡ Parallel runs** - assemblies are independent and can be processed concurrently
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotprune::prelude::*;
//!
//! let config = Configuration::from_file("prune.json".as_ref())?;
//! let report = Runner::new(RunOptions::new()).run(&config)?;
//! println!("{} assemblies pruned", report.success_count());
//! # Ok::<(), dotprune::Error>(())
//! ```
//!
//! ### Pruning an in-memory assembly
//!
//! ```rust
//! use dotprune::prelude::*;
//!
//! let mut assembly = AssemblyDef::new("Contoso", AssemblyVersion::new(1, 0, 0, 0));
//! let mut module = ModuleDef::new("Contoso.dll");
//! module.types.push(TypeDef::new("Contoso", "Old", TypeVisibility::Public));
//! assembly.modules.push(module);
//!
//! let config = Configuration::from_str(
//!     r#"{"Assemblies":{"Contoso":{"Mode":"Remove","Types":["Contoso.Old"]}}}"#,
//! )?;
//! let external = TypeIndex::default();
//! let stats = AssemblyPruner::new(&config.assemblies["Contoso"], &external)
//!     .prune(&mut assembly)?;
//!
//! assert_eq!(stats.types_removed, 1);
//! assert!(assembly.modules[0].types.is_empty());
//! # Ok::<(), dotprune::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - the policy tree and its loader
//! - [`metadata`] - the in-memory metadata model, type resolution and the model provider seam
//! - [`pruning`] - the two-pass pruning engine
//! - [`project`] - run orchestration over the assemblies of a policy
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]; see [`Error`] for the failure categories.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotprune::prelude::*;
///
/// let options = RunOptions::new().output_dir("ref");
/// assert_eq!(options.output(), std::path::Path::new("ref"));
/// ```
pub mod prelude;

/// Pruning policies and their loader
pub mod config;

/// In-memory metadata model of .NET assemblies
pub mod metadata;

/// The pruning engine
pub mod pruning;

/// Run orchestration over the assemblies of a policy
pub mod project;

/// `dotprune` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotprune` Error type
///
/// # Examples
///
/// ```rust
/// use dotprune::{config::Configuration, Error};
///
/// match Configuration::from_str(r#"{"Assemblies":{"A":{"Mode":"Drop"}}}"#) {
///     Err(Error::Configuration { message, .. }) => println!("Invalid policy: {}", message),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub use error::Error;
