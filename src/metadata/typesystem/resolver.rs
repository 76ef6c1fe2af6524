use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::debug;

use crate::{
    metadata::{
        customattributes::{CustomAttribute, HasCustomAttributes},
        flags::{TypeVisibility, VisibilityTier},
        loader::ModelProvider,
        method::MemberRef,
        module::{AssemblyDef, ModuleDef},
        signatures::{TypeRef, TypeSignature},
        typesystem::TypeDef,
    },
    Error, Result,
};

/// What the pruning engine needs to know about a referenced type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    /// Full name of the definition
    pub full_name: String,
    /// Defining assembly, `None` for the module being processed
    pub scope: Option<String>,
    /// Declared visibility
    pub visibility: TypeVisibility,
    /// The lowest tier along the chain of enclosing types, the type itself included
    pub effective_tier: VisibilityTier,
    /// Whether the definition is an interface
    pub is_interface: bool,
    /// The type this definition extends
    pub base: Option<TypeRef>,
    /// Constraint types of all generic parameters of the definition
    pub generic_constraints: Vec<TypeSignature>,
    /// Methods declared by the definition
    pub methods: Vec<MemberRef>,
    /// Custom attributes applied to the definition
    pub custom_attributes: Vec<CustomAttribute>,
}

impl ResolvedType {
    fn from_type(ty: &TypeDef, enclosing_tier: Option<VisibilityTier>, scope: Option<&str>) -> Self {
        let own_tier = ty.visibility.tier();
        let full_name = ty.full_name();
        let declaring = TypeSignature::Class(TypeRef {
            full_name: full_name.clone(),
            scope: scope.map(str::to_string),
        });

        let mut base = ty.base.as_ref().and_then(TypeSignature::scope_type).cloned();
        let mut generic_constraints: Vec<TypeSignature> = ty
            .generic_params
            .iter()
            .flat_map(|param| param.constraints.iter().cloned())
            .collect();
        if let Some(scope) = scope {
            if let Some(base) = &mut base {
                base.qualify(scope);
            }
            for constraint in &mut generic_constraints {
                constraint.qualify(scope);
            }
        }

        ResolvedType {
            full_name,
            scope: scope.map(str::to_string),
            visibility: ty.visibility,
            effective_tier: enclosing_tier.map_or(own_tier, |tier| tier.min(own_tier)),
            is_interface: ty.is_interface(),
            base,
            generic_constraints,
            methods: ty
                .methods
                .iter()
                .map(|method| MemberRef {
                    declaring_type: declaring.clone(),
                    name: method.name.clone(),
                    signature: method
                        .signature
                        .clone()
                        .with_generic_params(method.generic_arity()),
                })
                .collect(),
            custom_attributes: ty.custom_attributes.clone(),
        }
    }
}

impl HasCustomAttributes for ResolvedType {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}

/// Resolves type references to their definitions.
pub trait TypeResolver {
    /// Resolve `reference`.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if no definition exists, or the error raised while
    /// loading the defining assembly.
    fn resolve(&self, reference: &TypeRef) -> Result<Arc<ResolvedType>>;
}

/// Snapshot of the type definitions of one module or assembly, keyed by full name.
///
/// The index of the module being pruned is taken before any type is removed, so resolution
/// does not depend on the order in which types are processed.
#[derive(Debug, Default, Clone)]
pub struct TypeIndex {
    types: HashMap<String, Arc<ResolvedType>>,
}

impl TypeIndex {
    /// Index every type of `module`, nested types included
    #[must_use]
    pub fn from_module(module: &ModuleDef, scope: Option<&str>) -> Self {
        let mut index = TypeIndex::default();
        index.add_module(module, scope);
        index
    }

    /// Index every type of every module of `assembly`
    #[must_use]
    pub fn from_assembly(assembly: &AssemblyDef, scope: Option<&str>) -> Self {
        let mut index = TypeIndex::default();
        for module in &assembly.modules {
            index.add_module(module, scope);
        }
        index
    }

    fn add_module(&mut self, module: &ModuleDef, scope: Option<&str>) {
        for ty in &module.types {
            self.add_type(ty, None, scope);
        }
    }

    fn add_type(&mut self, ty: &TypeDef, enclosing_tier: Option<VisibilityTier>, scope: Option<&str>) {
        let resolved = ResolvedType::from_type(ty, enclosing_tier, scope);
        let tier = resolved.effective_tier;
        self.types
            .insert(resolved.full_name.clone(), Arc::new(resolved));
        for nested in &ty.nested_types {
            self.add_type(nested, Some(tier), scope);
        }
    }

    /// Look up a definition by full name
    #[must_use]
    pub fn get(&self, full_name: &str) -> Option<&Arc<ResolvedType>> {
        self.types.get(full_name)
    }

    /// Number of indexed definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeIndex {
    fn resolve(&self, reference: &TypeRef) -> Result<Arc<ResolvedType>> {
        self.get(&reference.full_name)
            .cloned()
            .ok_or_else(|| Error::TypeNotFound(reference.full_name.clone()))
    }
}

/// Loads referenced assemblies from a list of search roots and caches their type indices.
pub struct AssemblyResolver {
    provider: Arc<dyn ModelProvider>,
    search_roots: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Arc<TypeIndex>>>,
}

impl AssemblyResolver {
    /// Create a resolver searching `search_roots` in order
    pub fn new(provider: Arc<dyn ModelProvider>, search_roots: Vec<PathBuf>) -> Self {
        AssemblyResolver {
            provider,
            search_roots,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Append a search root; earlier roots take precedence
    pub fn add_search_root(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        debug!("Adding search root {}", root.display());
        self.search_roots.push(root);
    }

    /// The configured search roots
    #[must_use]
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// The provider used to load documents
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }

    /// Find the document of the module file `module_file` (e.g. `Foo.dll`) in the search roots.
    ///
    /// # Errors
    /// Returns [`Error::AssemblyNotFound`] if no search root contains the document.
    pub fn locate(&self, module_file: &str) -> Result<PathBuf> {
        let document = self.provider.document_name(module_file);
        self.search_roots
            .iter()
            .map(|root| root.join(&document))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| Error::AssemblyNotFound(module_file.to_string()))
    }

    /// Load an assembly document found in the search roots
    ///
    /// # Errors
    /// Returns [`Error::AssemblyNotFound`] or the provider's load error.
    pub fn load(&self, assembly_name: &str) -> Result<AssemblyDef> {
        let path = self.locate(&format!("{assembly_name}.dll"))?;
        self.load_path(&path)
    }

    /// Load a document by path
    ///
    /// # Errors
    /// Returns the provider's load error.
    pub fn load_path(&self, path: &Path) -> Result<AssemblyDef> {
        self.provider.load(path)
    }

    /// Type index of a referenced assembly, loading it on first use
    ///
    /// # Errors
    /// Returns [`Error::AssemblyNotFound`], the provider's load error, or
    /// [`Error::LockError`] if the cache lock is poisoned.
    pub fn index(&self, assembly_name: &str) -> Result<Arc<TypeIndex>> {
        if let Some(index) = self
            .cache
            .lock()
            .map_err(|_| Error::LockError)?
            .get(assembly_name)
        {
            return Ok(index.clone());
        }

        let assembly = self.load(assembly_name)?;
        let index = Arc::new(TypeIndex::from_assembly(&assembly, Some(assembly_name)));
        debug!(
            "Indexed {} types of referenced assembly {}",
            index.len(),
            assembly_name
        );

        self.cache
            .lock()
            .map_err(|_| Error::LockError)?
            .insert(assembly_name.to_string(), index.clone());
        Ok(index)
    }
}

impl TypeResolver for AssemblyResolver {
    fn resolve(&self, reference: &TypeRef) -> Result<Arc<ResolvedType>> {
        let Some(scope) = &reference.scope else {
            return Err(Error::TypeNotFound(reference.full_name.clone()));
        };
        self.index(scope)?.resolve(reference)
    }
}

/// Resolves references made from inside one assembly: scope-less references (and references
/// scoped to the assembly itself) hit the assembly's [`TypeIndex`], everything else goes to
/// the external resolver, usually an [`AssemblyResolver`].
pub struct ModuleResolver<'a> {
    local: &'a TypeIndex,
    assembly_name: &'a str,
    external: &'a dyn TypeResolver,
}

impl<'a> ModuleResolver<'a> {
    /// Create a resolver for a module of `assembly_name`
    #[must_use]
    pub fn new(
        local: &'a TypeIndex,
        assembly_name: &'a str,
        external: &'a dyn TypeResolver,
    ) -> Self {
        ModuleResolver {
            local,
            assembly_name,
            external,
        }
    }
}

impl TypeResolver for ModuleResolver<'_> {
    fn resolve(&self, reference: &TypeRef) -> Result<Arc<ResolvedType>> {
        match reference.scope.as_deref() {
            None => self.local.resolve(reference),
            Some(scope) if scope == self.assembly_name => self.local.resolve(reference),
            Some(_) => self.external.resolve(reference),
        }
    }
}
