use crate::metadata::{
    customattributes::{CustomAttribute, CustomAttributeArgument},
    flags::{MemberAccess, MethodModifiers, TypeModifiers, TypeVisibility},
    identity::AssemblyVersion,
    members::{FieldDef, InterfaceImpl, PropertyDef},
    method::{Instruction, MemberRef, MethodBody, MethodDef, MethodOverride},
    module::{AssemblyDef, ModuleDef},
    signatures::{SignatureMethod, SignatureProperty, TypeRef, TypeSignature},
    typesystem::{TypeDef, TypeIndex, MODULE_TYPE_NAME},
};

/// Name of the runtime assembly the samples reference
pub const RUNTIME: &str = "System.Runtime";

// Helper function to create a small real-looking method body
pub fn create_body() -> MethodBody {
    MethodBody {
        max_stack: 8,
        init_locals: true,
        locals: vec![TypeSignature::I4, TypeSignature::String],
        instructions: vec![
            Instruction::simple(0x00, "nop"),
            Instruction::simple(0x16, "ldc.i4.0"),
            Instruction::simple(0x0A, "stloc.0"),
            Instruction::ret(),
        ],
        exception_handlers: Vec::new(),
    }
}

// Helper function to create an instance method with a body
pub fn create_method(
    name: &str,
    access: MemberAccess,
    return_type: TypeSignature,
    params: Vec<TypeSignature>,
) -> MethodDef {
    let mut method = MethodDef::new(name, access, SignatureMethod::instance(return_type, params));
    method.body = Some(create_body());
    method
}

// Helper function to create a reference to a runtime type
pub fn runtime_type(full_name: &str) -> TypeSignature {
    TypeSignature::Class(TypeRef::external(full_name, RUNTIME))
}

// Helper function to create the `System.Runtime` assembly the samples resolve against
pub fn create_runtime() -> AssemblyDef {
    let mut runtime = AssemblyDef::new(RUNTIME, AssemblyVersion::new(8, 0, 0, 0));
    let mut module = ModuleDef::new("System.Runtime.dll");

    module
        .types
        .push(TypeDef::new("System", "Object", TypeVisibility::Public));
    let mut attribute = TypeDef::new("System", "Attribute", TypeVisibility::Public);
    attribute.modifiers |= TypeModifiers::ABSTRACT;
    attribute.base = Some(TypeSignature::class("System.Object"));
    module.types.push(attribute);

    let mut disposable = TypeDef::new("System", "IDisposable", TypeVisibility::Public);
    disposable.modifiers |= TypeModifiers::INTERFACE | TypeModifiers::ABSTRACT;
    let mut dispose = MethodDef::new(
        "Dispose",
        MemberAccess::Public,
        SignatureMethod::instance(TypeSignature::Void, vec![]),
    );
    dispose.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::ABSTRACT;
    disposable.methods.push(dispose);
    module.types.push(disposable);

    runtime.modules.push(module);
    runtime.link();
    runtime
}

// Helper function to index the runtime assembly for external resolution
pub fn sample_external() -> TypeIndex {
    TypeIndex::from_assembly(&create_runtime(), Some(RUNTIME))
}

// Helper function to create `Contoso.Widget`
fn create_widget() -> TypeDef {
    let mut widget = TypeDef::new("Contoso", "Widget", TypeVisibility::Public);
    widget.base = Some(runtime_type("System.Object"));
    widget
        .interfaces
        .push(InterfaceImpl::new(runtime_type("System.IDisposable")));

    let mut ctor = create_method(".ctor", MemberAccess::Public, TypeSignature::Void, vec![]);
    ctor.modifiers |= MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME;
    widget.methods.push(ctor);
    widget.methods.push(create_method(
        "Reset",
        MemberAccess::Public,
        TypeSignature::Void,
        vec![],
    ));
    widget.methods.push(create_method(
        "Import",
        MemberAccess::Public,
        TypeSignature::Void,
        vec![TypeSignature::class("Contoso.Legacy")],
    ));

    let mut dispose = create_method(
        "System.IDisposable.Dispose",
        MemberAccess::Private,
        TypeSignature::Void,
        vec![],
    );
    dispose.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::FINAL;
    dispose.overrides.push(MethodOverride {
        declaration: MemberRef {
            declaring_type: runtime_type("System.IDisposable"),
            name: "Dispose".to_string(),
            signature: SignatureMethod::instance(TypeSignature::Void, vec![]),
        },
        body: "System.Void System.IDisposable.Dispose()".to_string(),
    });
    widget.methods.push(dispose);

    widget.methods.push(create_method(
        "Log",
        MemberAccess::Private,
        TypeSignature::Void,
        vec![TypeSignature::String],
    ));
    widget.methods.push(create_method(
        "get_Name",
        MemberAccess::Public,
        TypeSignature::String,
        vec![],
    ));

    let mut name = PropertyDef::new(
        "Name",
        SignatureProperty {
            has_this: true,
            base: TypeSignature::String,
            params: vec![],
        },
    );
    name.getters.push("System.String get_Name()".to_string());
    widget.properties.push(name);

    widget.fields.push(FieldDef::new(
        "_name",
        MemberAccess::Private,
        TypeSignature::String,
    ));

    let mut cache = TypeDef::new("", "Cache", TypeVisibility::NestedPrivate);
    cache.methods.push(create_method(
        "Clear",
        MemberAccess::Public,
        TypeSignature::Void,
        vec![],
    ));
    widget.add_nested(cache);
    widget
}

// Helper function to create the `Contoso.Core` sample assembly
pub fn sample_assembly() -> AssemblyDef {
    let mut assembly = AssemblyDef::new("Contoso.Core", AssemblyVersion::new(1, 0, 0, 0));
    assembly.custom_attributes.push(CustomAttribute::new(
        TypeRef::external(
            "System.Runtime.Versioning.TargetFrameworkAttribute",
            RUNTIME,
        ),
        vec![CustomAttributeArgument::String(
            ".NETCoreApp,Version=v8.0".to_string(),
        )],
    ));

    let mut module = ModuleDef::new("Contoso.Core.dll");
    module
        .types
        .push(TypeDef::new("", MODULE_TYPE_NAME, TypeVisibility::NotPublic));

    let mut legacy = TypeDef::new("Contoso", "Legacy", TypeVisibility::Public);
    legacy
        .custom_attributes
        .push(CustomAttribute::obsolete(Some("Use Widget")));
    module.types.push(legacy);

    module.types.push(create_widget());

    let mut host = TypeDef::new("Contoso", "IWidgetHost", TypeVisibility::Public);
    host.modifiers |= TypeModifiers::INTERFACE | TypeModifiers::ABSTRACT;
    let mut attach = MethodDef::new(
        "Attach",
        MemberAccess::Public,
        SignatureMethod::instance(TypeSignature::Void, vec![TypeSignature::class("Contoso.Widget")]),
    );
    attach.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::ABSTRACT;
    host.methods.push(attach);
    module.types.push(host);

    let mut marker = TypeDef::new("Contoso", "ThingAttribute", TypeVisibility::NotPublic);
    marker.base = Some(runtime_type("System.Attribute"));
    module.types.push(marker);

    assembly.modules.push(module);
    assembly.link();
    assembly
}
