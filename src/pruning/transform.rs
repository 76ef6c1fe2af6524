//! Transforms applied besides removal: body stubbing and assembly renaming.

use log::debug;

use crate::{
    config::RenameAssembly,
    metadata::{
        method::{MethodBody, MethodDef},
        module::AssemblyDef,
    },
    Result,
};

/// Module file suffixes kept across a rename
const MODULE_SUFFIXES: &[&str] = &[".dll", ".exe"];

/// Replace the body of `method` with `ldnull; throw`.
///
/// Methods without a body (abstract, extern and interface methods) are left alone. Returns
/// `true` if a body was replaced.
pub fn stub_body(method: &mut MethodDef) -> bool {
    match &mut method.body {
        Some(body) => {
            *body = MethodBody::stub();
            true
        }
        None => false,
    }
}

/// Apply `rename` to the identity of `assembly`.
///
/// A new name renames the assembly and its manifest module; the module keeps a `.dll` or
/// `.exe` suffix when it had one. A new version replaces the assembly version. Blank values
/// leave the corresponding part unchanged.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the new version does not parse.
pub fn rename_assembly(assembly: &mut AssemblyDef, rename: &RenameAssembly) -> Result<()> {
    let version = rename.version()?;

    if let Some(name) = rename.name() {
        debug!("Renaming assembly {} to {}", assembly.name, name);
        assembly.name = name.to_string();
        if let Some(module) = assembly.manifest_module_mut() {
            let renamed = format!("{name}{}", module_suffix(&module.name).unwrap_or(""));
            module.name = renamed;
        }
    }

    if let Some(version) = version {
        debug!("Setting version of {} to {}", assembly.name, version);
        assembly.version = version;
    }
    Ok(())
}

/// The `.dll` or `.exe` suffix of `module_name`, matched ignoring case and returned as written
fn module_suffix(module_name: &str) -> Option<&str> {
    MODULE_SUFFIXES.iter().find_map(|suffix| {
        let start = module_name.len().checked_sub(suffix.len())?;
        let tail = module_name.get(start..)?;
        tail.eq_ignore_ascii_case(suffix).then_some(tail)
    })
}
