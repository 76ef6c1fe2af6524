//! Member signatures and their textual full names.
//!
//! Signatures describe the types a member mentions: parameter and return types, field
//! types, property types, generic constraints and function pointer shapes. The pruning
//! engine walks them to decide whether a member still only references surviving, visible
//! types.
//!
//! Every signature renders to the same textual form used for symbol names and for the
//! explicit lists in the policy document:
//!
//! | Signature | Rendering |
//! |-----------|-----------|
//! | `I4` | `System.Int32` |
//! | `SzArray(Class(A.B))` | `A.B[]` |
//! | `GenericInst(Class(List`1), [I4])` | ``List`1<System.Int32>`` |
//! | `GenericParamMethod(!!0)` | `!!0` (or the declared name) |
//! | `FnPtr(void(int))` | `method System.Void *(System.Int32)` |
//!
//! # Examples
//!
//! ```rust
//! use dotprune::metadata::signatures::{TypeSignature, TypeRef};
//!
//! let sig = TypeSignature::SzArray(Box::new(TypeSignature::class("Contoso.Widget")));
//! assert_eq!(sig.full_name(), "Contoso.Widget[]");
//! assert_eq!(sig.scope_type(), Some(&TypeRef::local("Contoso.Widget")));
//! ```

mod types;

pub use types::*;
