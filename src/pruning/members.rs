//! The member pass.
//!
//! Runs per surviving type after the type pass has filled the removed-type registry. The
//! categories are processed in a fixed order:
//!
//! 1. interface implementations, which may force-remove implementing methods
//! 2. methods, after stripping override records left dangling by step 1
//! 3. fields
//! 4. events, with their accessor toggles
//! 5. properties, with their accessor toggles
//!
//! Removing a method detaches it from its property or event; an accessor-less property or
//! event is removed on the same pass. In reference mode the surviving bodies are stubbed
//! last. Nested types are pruned after their enclosing type with their own configuration.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    config::{EventConfig, PropertyConfig, TypeConfig},
    metadata::{
        members::{EventDef, InterfaceImpl, PropertyDef},
        method::MethodDef,
        typesystem::TypeDef,
    },
    pruning::{
        context::PruneContext,
        decisions::{member_full_name, member_full_names, RemovalSet},
        interfaces::prune_interfaces,
        obsolete::is_obsolete,
        reachability::SignatureChecker,
        transform::stub_body,
        visibility::member_is_api_visible,
    },
    Result,
};

/// List decisions of one type, expanded to fully qualified names
struct MemberDecisions<'c> {
    methods: RemovalSet,
    fields: RemovalSet,
    properties: RemovalSet,
    events: RemovalSet,
    interfaces: RemovalSet,
    keep: HashSet<String>,
    property_toggles: HashMap<String, &'c PropertyConfig>,
    event_toggles: HashMap<String, &'c EventConfig>,
}

impl<'c> MemberDecisions<'c> {
    fn new(ty: &TypeDef, config: Option<&'c TypeConfig>) -> Result<Self> {
        let Some(config) = config else {
            return Ok(MemberDecisions {
                methods: RemovalSet::new(),
                fields: RemovalSet::new(),
                properties: RemovalSet::new(),
                events: RemovalSet::new(),
                interfaces: RemovalSet::new(),
                keep: HashSet::new(),
                property_toggles: HashMap::new(),
                event_toggles: HashMap::new(),
            });
        };

        let name = ty.full_name();
        let mode = config.mode();
        Ok(MemberDecisions {
            methods: RemovalSet::resolve(mode, member_full_names(&name, &config.methods)?, || {
                ty.methods
                    .iter()
                    .map(|method| method.full_name(&name))
                    .collect::<Vec<_>>()
            }),
            fields: RemovalSet::resolve(mode, member_full_names(&name, &config.fields)?, || {
                ty.fields
                    .iter()
                    .map(|field| field.full_name(&name))
                    .collect::<Vec<_>>()
            }),
            properties: RemovalSet::resolve(
                mode,
                member_full_names(&name, &config.properties)?,
                || {
                    ty.properties
                        .iter()
                        .map(|property| property.full_name(&name))
                        .collect::<Vec<_>>()
                },
            ),
            events: RemovalSet::resolve(mode, member_full_names(&name, &config.events)?, || {
                ty.events
                    .iter()
                    .map(|event| event.full_name(&name))
                    .collect::<Vec<_>>()
            }),
            interfaces: RemovalSet::resolve(mode, config.interfaces.iter().cloned(), || {
                ty.interfaces
                    .iter()
                    .map(InterfaceImpl::full_name)
                    .collect::<Vec<_>>()
            }),
            keep: member_full_names(&name, &config.interface_methods_to_keep)?
                .into_iter()
                .collect(),
            property_toggles: config
                .property_configuration
                .iter()
                .map(|(entry, toggle)| member_full_name(&name, entry).map(|full| (full, toggle)))
                .collect::<Result<_>>()?,
            event_toggles: config
                .event_configuration
                .iter()
                .map(|(entry, toggle)| member_full_name(&name, entry).map(|full| (full, toggle)))
                .collect::<Result<_>>()?,
        })
    }
}

/// Prune the members of `ty` and of every type nested in it.
///
/// `inherited_remove_obsolete` is the effective flag of the enclosing level.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for a member entry of `config` that is not of the form
/// `Type Name`, and resolution errors raised by interface and signature checks.
pub fn prune_members(
    ty: &mut TypeDef,
    config: Option<&TypeConfig>,
    inherited_remove_obsolete: bool,
    ctx: &mut PruneContext<'_>,
) -> Result<()> {
    let remove_obsolete = config.map_or(inherited_remove_obsolete, |c| {
        c.effective_remove_obsolete(inherited_remove_obsolete)
    });
    let type_name = ty.full_name();
    let mut decisions = MemberDecisions::new(ty, config)?;

    let methods_before = ty.methods.len();
    let properties_before = ty.properties.len();
    let events_before = ty.events.len();

    let cascade = prune_interfaces(
        ty,
        &decisions.interfaces,
        remove_obsolete,
        &mut decisions.methods,
        &decisions.keep,
        ctx,
    )?;

    for method in &mut ty.methods {
        let before = method.overrides.len();
        method.overrides.retain(|record| !cascade.strips(record));
        ctx.stats.overrides_stripped += before - method.overrides.len();
    }

    let doomed = doomed_methods(ty, &type_name, &decisions, remove_obsolete, ctx)?;
    for relative in doomed {
        trace!("Removed method {} from {}", relative, type_name);
        ty.remove_method(&relative, true);
    }

    prune_fields(ty, &type_name, &decisions.fields, remove_obsolete, ctx);
    prune_events(ty, &type_name, &decisions, remove_obsolete);
    prune_properties(ty, &type_name, &decisions, remove_obsolete);

    ctx.stats.methods_removed += methods_before - ty.methods.len();
    ctx.stats.properties_removed += properties_before - ty.properties.len();
    ctx.stats.events_removed += events_before - ty.events.len();

    if ctx.reference_assembly {
        for method in &mut ty.methods {
            if stub_body(method) {
                ctx.stats.bodies_stubbed += 1;
            }
        }
    }

    for nested in &mut ty.nested_types {
        let nested_config =
            config.and_then(|c| c.inner_type_configuration.get(&nested.simple_name()));
        prune_members(nested, nested_config, remove_obsolete, ctx)?;
    }
    Ok(())
}

/// Relative names of the methods the method rules remove
fn doomed_methods(
    ty: &TypeDef,
    type_name: &str,
    decisions: &MemberDecisions<'_>,
    remove_obsolete: bool,
    ctx: &PruneContext<'_>,
) -> Result<Vec<String>> {
    let checker = SignatureChecker::new(&ctx.registry, ctx.resolver);
    let mut doomed = Vec::new();

    for method in &ty.methods {
        let full_name = method.full_name(type_name);
        let removed = non_api(method, ctx.reference_assembly)
            || decisions
                .methods
                .removes(&full_name, decisions.keep.contains(&full_name))
            || (remove_obsolete && is_obsolete(method))
            || !checker.method_ok(method)?;
        if removed {
            doomed.push(method.relative_name());
        }
    }
    Ok(doomed)
}

fn non_api(method: &MethodDef, reference_assembly: bool) -> bool {
    reference_assembly && !member_is_api_visible(method.access) && !method.has_overrides()
}

fn prune_fields(
    ty: &mut TypeDef,
    type_name: &str,
    listed: &RemovalSet,
    remove_obsolete: bool,
    ctx: &mut PruneContext<'_>,
) {
    let before = ty.fields.len();
    let registry = &ctx.registry;
    let reference_assembly = ctx.reference_assembly;
    ty.fields.retain(|field| {
        let full_name = field.full_name(type_name);
        let removed = (reference_assembly && !member_is_api_visible(field.access))
            || listed.removes(&full_name, false)
            || registry.mentions(&field.field_type)
            || (remove_obsolete && is_obsolete(field));
        if removed {
            trace!("Removed field {}", full_name);
        }
        !removed
    });
    ctx.stats.fields_removed += before - ty.fields.len();
}

fn find_event<'t>(ty: &'t TypeDef, type_name: &str, full_name: &str) -> Option<&'t EventDef> {
    ty.events
        .iter()
        .find(|event| event.full_name(type_name) == full_name)
}

fn prune_events(
    ty: &mut TypeDef,
    type_name: &str,
    decisions: &MemberDecisions<'_>,
    remove_obsolete: bool,
) {
    let names: Vec<String> = ty
        .events
        .iter()
        .map(|event| event.full_name(type_name))
        .collect();

    for full_name in names {
        let Some(event) = find_event(ty, type_name, &full_name) else {
            continue;
        };

        if let Some(toggle) = decisions.event_toggles.get(&full_name) {
            let add = event.add.clone().filter(|_| toggle.add == Some(false));
            let remove = event.remove.clone().filter(|_| toggle.remove == Some(false));
            let others = if toggle.other == Some(false) {
                event.others.clone()
            } else {
                Vec::new()
            };

            for accessor in add.iter().chain(remove.iter()) {
                ty.remove_method(accessor, true);
            }
            for accessor in &others {
                ty.remove_method(accessor, false);
            }
        }

        let Some(event) = find_event(ty, type_name, &full_name) else {
            continue;
        };
        if event.is_empty()
            || decisions.events.removes(&full_name, false)
            || (remove_obsolete && is_obsolete(event))
        {
            let accessors: Vec<String> = event.accessors().cloned().collect();
            for accessor in &accessors {
                ty.remove_method(accessor, true);
            }
            ty.events
                .retain(|event| event.full_name(type_name) != full_name);
            trace!("Removed event {}", full_name);
        }
    }
}

fn find_property<'t>(
    ty: &'t TypeDef,
    type_name: &str,
    full_name: &str,
) -> Option<&'t PropertyDef> {
    ty.properties
        .iter()
        .find(|property| property.full_name(type_name) == full_name)
}

fn prune_properties(
    ty: &mut TypeDef,
    type_name: &str,
    decisions: &MemberDecisions<'_>,
    remove_obsolete: bool,
) {
    let names: Vec<String> = ty
        .properties
        .iter()
        .map(|property| property.full_name(type_name))
        .collect();

    for full_name in names {
        let Some(property) = find_property(ty, type_name, &full_name) else {
            continue;
        };

        if let Some(toggle) = decisions.property_toggles.get(&full_name) {
            let mut dropped = Vec::new();
            if toggle.setter == Some(false) {
                dropped.extend(property.setters.iter().cloned());
            }
            if toggle.getter == Some(false) {
                dropped.extend(property.getters.iter().cloned());
            }
            if toggle.other == Some(false) {
                dropped.extend(property.others.iter().cloned());
            }
            for accessor in &dropped {
                ty.remove_method(accessor, true);
            }
        }

        let Some(property) = find_property(ty, type_name, &full_name) else {
            continue;
        };
        if property.is_empty()
            || decisions.properties.removes(&full_name, false)
            || (remove_obsolete && is_obsolete(property))
        {
            let accessors: Vec<String> = property.accessors().cloned().collect();
            for accessor in &accessors {
                ty.remove_method(accessor, true);
            }
            ty.properties
                .retain(|property| property.full_name(type_name) != full_name);
            trace!("Removed property {}", full_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Mode,
        metadata::{
            customattributes::CustomAttribute,
            flags::{MemberAccess, TypeVisibility},
            members::{FieldDef, PropertyDef},
            method::MethodBody,
            signatures::{GenericParam, SignatureMethod, SignatureProperty, TypeSignature},
            typesystem::TypeIndex,
        },
        pruning::EMBEDDED_REFERENCES_MESSAGE,
        Error,
    };

    fn method(name: &str, access: MemberAccess, params: Vec<TypeSignature>) -> MethodDef {
        let mut method = MethodDef::new(
            name,
            access,
            SignatureMethod::instance(TypeSignature::Void, params),
        );
        method.body = Some(MethodBody {
            max_stack: 2,
            init_locals: true,
            locals: vec![TypeSignature::I4],
            instructions: vec![crate::metadata::method::Instruction::ret()],
            exception_handlers: Vec::new(),
        });
        method
    }

    fn accessor(name: &str, ret: TypeSignature, params: Vec<TypeSignature>) -> MethodDef {
        MethodDef::new(
            name,
            MemberAccess::Public,
            SignatureMethod::instance(ret, params),
        )
    }

    fn widget() -> TypeDef {
        let mut ty = TypeDef::new("A", "Widget", TypeVisibility::Public);
        ty.methods
            .push(method("Run", MemberAccess::Public, vec![]));
        ty.methods
            .push(method("Helper", MemberAccess::Private, vec![]));
        ty.methods.push(method(
            "Take",
            MemberAccess::Public,
            vec![TypeSignature::class("A.Gone")],
        ));
        ty.methods
            .push(accessor("get_Size", TypeSignature::I4, vec![]));
        ty.methods
            .push(accessor("set_Size", TypeSignature::Void, vec![TypeSignature::I4]));
        ty.methods.push(accessor(
            "add_Changed",
            TypeSignature::Void,
            vec![TypeSignature::Object],
        ));
        ty.methods.push(accessor(
            "remove_Changed",
            TypeSignature::Void,
            vec![TypeSignature::Object],
        ));

        let mut size = PropertyDef::new(
            "Size",
            SignatureProperty {
                has_this: true,
                base: TypeSignature::I4,
                params: vec![],
            },
        );
        size.getters.push("System.Int32 get_Size()".to_string());
        size.setters.push("System.Void set_Size(System.Int32)".to_string());
        ty.properties.push(size);

        let mut changed = EventDef::new("Changed", TypeSignature::Object);
        changed.add = Some("System.Void add_Changed(System.Object)".to_string());
        changed.remove = Some("System.Void remove_Changed(System.Object)".to_string());
        ty.events.push(changed);

        ty.fields.push(FieldDef::new(
            "count",
            MemberAccess::Private,
            TypeSignature::I4,
        ));
        ty.fields.push(FieldDef::new(
            "Gone",
            MemberAccess::Public,
            TypeSignature::SzArray(Box::new(TypeSignature::class("A.Gone"))),
        ));
        ty
    }

    fn index() -> TypeIndex {
        let mut module = crate::metadata::module::ModuleDef::new("A.dll");
        module.types.push(widget());
        module
            .types
            .push(TypeDef::new("A", "Gone", TypeVisibility::Public));
        TypeIndex::from_module(&module, None)
    }

    fn method_names(ty: &TypeDef) -> Vec<String> {
        ty.methods.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_unreachable_members_removed_without_config() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        ctx.registry.insert("A.Gone");
        let mut ty = widget();

        prune_members(&mut ty, None, true, &mut ctx).unwrap();

        assert!(!method_names(&ty).contains(&"Take".to_string()));
        assert!(method_names(&ty).contains(&"Helper".to_string()));
        assert_eq!(ty.fields.len(), 1);
        assert_eq!(ctx.stats.methods_removed, 1);
        assert_eq!(ctx.stats.fields_removed, 1);
        assert_eq!(ctx.stats.bodies_stubbed, 0);
    }

    #[test]
    fn test_reference_mode_removes_non_api_and_stubs() {
        let index = index();
        let mut ctx = PruneContext::new(&index, true);
        let mut ty = widget();
        ty.methods.retain(|m| m.name != "Take");

        prune_members(&mut ty, None, true, &mut ctx).unwrap();

        assert!(!method_names(&ty).contains(&"Helper".to_string()));
        assert!(ty.fields.iter().all(|f| f.name != "count"));
        let run = ty.methods.iter().find(|m| m.name == "Run").unwrap();
        assert!(run.body.as_ref().unwrap().is_stub());
        assert_eq!(ctx.stats.bodies_stubbed, 1);
        // accessors without a body stay bodiless
        assert!(ty.methods.iter().filter(|m| m.name != "Run").all(|m| m.body.is_none()));
    }

    #[test]
    fn test_listed_and_obsolete_methods() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        ty.methods[1]
            .custom_attributes
            .push(CustomAttribute::obsolete(Some(EMBEDDED_REFERENCES_MESSAGE)));
        ty.methods[3]
            .custom_attributes
            .push(CustomAttribute::obsolete(Some("Use Measure")));
        let config = TypeConfig {
            mode: Some(Mode::Remove),
            methods: vec!["System.Void Run()".to_string()],
            ..TypeConfig::default()
        };

        prune_members(&mut ty, Some(&config), true, &mut ctx).unwrap();
        let names = method_names(&ty);
        assert!(!names.contains(&"Run".to_string()));
        assert!(names.contains(&"Helper".to_string()));
        assert!(!names.contains(&"get_Size".to_string()));
        // the setter keeps the property alive
        assert_eq!(ty.properties.len(), 1);
        assert!(ty.properties[0].getters.is_empty());
    }

    #[test]
    fn test_property_emptiness_cascade() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        let config = TypeConfig {
            mode: Some(Mode::Remove),
            methods: vec![
                "System.Int32 get_Size()".to_string(),
                "System.Void set_Size(System.Int32)".to_string(),
            ],
            ..TypeConfig::default()
        };

        prune_members(&mut ty, Some(&config), true, &mut ctx).unwrap();
        assert!(ty.properties.is_empty());
        assert_eq!(ctx.stats.properties_removed, 1);
        assert_eq!(ctx.stats.methods_removed, 2);
    }

    #[test]
    fn test_removed_property_takes_accessors() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        let config = TypeConfig {
            mode: Some(Mode::Remove),
            properties: vec!["System.Int32 Size()".to_string()],
            events: vec!["System.Object Changed".to_string()],
            ..TypeConfig::default()
        };

        prune_members(&mut ty, Some(&config), true, &mut ctx).unwrap();
        assert!(ty.properties.is_empty());
        assert!(ty.events.is_empty());
        let names = method_names(&ty);
        assert!(!names.iter().any(|n| n.contains("Size") || n.contains("Changed")));
        assert_eq!(ctx.stats.methods_removed, 4);
        assert_eq!(ctx.stats.events_removed, 1);
    }

    #[test]
    fn test_accessor_toggles() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        let mut config = TypeConfig::default();
        config.property_configuration.insert(
            "System.Int32 Size()".to_string(),
            PropertyConfig {
                setter: Some(false),
                ..PropertyConfig::default()
            },
        );
        config.event_configuration.insert(
            "System.Object Changed".to_string(),
            EventConfig {
                add: Some(false),
                remove: Some(false),
                other: None,
            },
        );

        prune_members(&mut ty, Some(&config), true, &mut ctx).unwrap();
        assert_eq!(ty.properties.len(), 1);
        assert!(ty.properties[0].setters.is_empty());
        assert_eq!(ty.properties[0].getters.len(), 1);
        assert!(ty.events.is_empty());
        assert!(ty.method("System.Void set_Size(System.Int32)").is_none());
    }

    #[test]
    fn test_keep_mode_respects_interface_keep_list() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        let config = TypeConfig {
            mode: Some(Mode::Keep),
            methods: vec!["System.Void Run()".to_string()],
            fields: vec!["System.Int32 count".to_string()],
            properties: vec!["System.Int32 Size()".to_string()],
            events: vec!["System.Object Changed".to_string()],
            interface_methods_to_keep: vec!["System.Void Helper()".to_string()],
            ..TypeConfig::default()
        };

        prune_members(&mut ty, Some(&config), true, &mut ctx).unwrap();
        let names = method_names(&ty);
        assert_eq!(names, vec!["Run", "Helper"]);
        // the listed property and event lost every accessor
        assert!(ty.properties.is_empty());
        assert!(ty.events.is_empty());
        assert_eq!(ty.fields.len(), 1);
    }

    #[test]
    fn test_generic_overload_removed_alone() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        ctx.registry.insert("A.Gone");

        let mut ty = TypeDef::new("A", "W", TypeVisibility::Public);
        ty.methods.push(method("M", MemberAccess::Public, vec![]));
        let mut generic = method("M", MemberAccess::Public, vec![]);
        generic.generic_params.push(GenericParam {
            number: 0,
            name: "T".to_string(),
            constraints: vec![TypeSignature::class("A.Gone")],
        });
        ty.methods.push(generic);

        prune_members(&mut ty, None, true, &mut ctx).unwrap();

        assert_eq!(ty.methods.len(), 1);
        assert_eq!(ty.methods[0].generic_arity(), 0);
        assert!(ty.method("System.Void M()").is_some());
        assert_eq!(ctx.stats.methods_removed, 1);
    }

    #[test]
    fn test_malformed_entry() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut ty = widget();
        let config = TypeConfig {
            mode: Some(Mode::Remove),
            fields: vec!["count".to_string()],
            ..TypeConfig::default()
        };
        assert!(matches!(
            prune_members(&mut ty, Some(&config), true, &mut ctx),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_nested_types_use_inner_configuration() {
        let index = index();
        let mut ctx = PruneContext::new(&index, false);
        let mut outer = TypeDef::new("A", "Outer", TypeVisibility::Public);
        let mut inner = TypeDef::new("", "Inner", TypeVisibility::NestedPublic);
        inner
            .methods
            .push(method("Run", MemberAccess::Public, vec![]));
        let mut old = method("Old", MemberAccess::Public, vec![]);
        old.custom_attributes.push(CustomAttribute::obsolete(None));
        inner.methods.push(old);
        outer.add_nested(inner);

        let mut config = TypeConfig {
            remove_obsolete: Some(false),
            ..TypeConfig::default()
        };
        config.inner_type_configuration.insert(
            "Inner".to_string(),
            TypeConfig {
                mode: Some(Mode::Remove),
                methods: vec!["System.Void Run()".to_string()],
                ..TypeConfig::default()
            },
        );

        prune_members(&mut outer, Some(&config), true, &mut ctx).unwrap();
        let inner = &outer.nested_types[0];
        assert_eq!(method_names(inner), vec!["Old"]);
    }
}
