//! Assembly identity: version numbers and target framework monikers.
//!
//! # Key Components
//!
//! - [`AssemblyVersion`] - Four-part version numbering with parsing and comparison
//! - [`TargetFramework`] - The decoded `TargetFrameworkAttribute` of an assembly, used to
//!   locate the runtime shared frameworks a module was compiled against

mod assembly;
mod framework;

pub use assembly::AssemblyVersion;
pub use framework::{TargetFramework, NETCORE_APP};
