// src/syntax.rs
//! Declaration model consumed by the conflict checker.
//!
//! The checker does not own a full syntax tree; an embedding front end lowers
//! its declarations into this closed variant type. Declarations are shared as
//! `Arc<Decl>` handles and identity (not value equality) is what the checker
//! deduplicates on.

use miette::SourceSpan;
use std::sync::Arc;

/// Source region of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,  // Byte offset
    pub end: usize,    // Byte offset (exclusive)
    pub line: u32,     // Start line (1-indexed)
    pub column: u32,   // Start column (1-indexed)
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// Stable identity handle for a declaration, carried into diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Identity of a source file inside a [`crate::scope::SourceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub u32);

/// Multi-declaration marker polarity for cross-target pairing.
///
/// An `Expect` declaration names a member some other compilation target must
/// realize; an `Actual` declaration is that realization. The two polarities
/// are mutually exclusive on one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Expect,
    Actual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// Whether a declaration sits at a file's top level or inside a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    TopLevel,
    Member,
}

/// Rendered type text as written in source (`Int`, `List<String>`, ...).
///
/// The checker never resolves types; the text participates in signature keys
/// exactly as the front end rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef(pub String);

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        TypeRef(text.to_string())
    }
}

/// One value parameter of a function declaration.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub is_vararg: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: &str) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_vararg: false,
        }
    }

    pub fn vararg(name: impl Into<String>, ty: &str) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_vararg: true,
        }
    }
}

/// A named program entity subject to conflict checking.
///
/// `File` and `Other` never become conflict candidates themselves; `Other`
/// covers constructs like constructors and anonymous initializers that share
/// a container with checkable declarations but cannot collide by name.
#[derive(Debug)]
pub enum Decl {
    Function(FuncDecl),
    Property(PropertyDecl),
    Class(ClassDecl),
    TypeAlias(TypeAliasDecl),
    File(SourceFile),
    Other(OtherDecl),
}

#[derive(Debug)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub type_params: u32,
    pub span: Span,
    pub symbol: Option<SymbolId>,
    pub marker: Option<Marker>,
    pub visibility: Visibility,
    pub container: ContainerKind,
    pub file: FileId,
}

#[derive(Debug)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: Option<TypeRef>,
    pub mutable: bool,
    pub span: Span,
    pub symbol: Option<SymbolId>,
    pub marker: Option<Marker>,
    pub visibility: Visibility,
    pub container: ContainerKind,
    pub file: FileId,
}

#[derive(Debug)]
pub struct ClassDecl {
    pub name: String,
    pub type_params: u32,
    pub members: Vec<Arc<Decl>>,
    pub span: Span,
    pub symbol: Option<SymbolId>,
    pub marker: Option<Marker>,
    pub visibility: Visibility,
    pub container: ContainerKind,
    pub file: FileId,
}

#[derive(Debug)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_params: u32,
    pub span: Span,
    pub symbol: Option<SymbolId>,
    pub marker: Option<Marker>,
    pub visibility: Visibility,
    pub container: ContainerKind,
    pub file: FileId,
}

/// Declaration kind the checker ignores (constructor, initializer, ...).
#[derive(Debug)]
pub struct OtherDecl {
    pub name: Option<String>,
    pub span: Span,
    pub file: FileId,
}

/// One source file: a top-level declaration container inside a package.
#[derive(Debug)]
pub struct SourceFile {
    pub id: FileId,
    pub package: String,
    pub span: Span,
    pub declarations: Vec<Arc<Decl>>,
}

impl Decl {
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Function(f) => Some(&f.name),
            Decl::Property(p) => Some(&p.name),
            Decl::Class(c) => Some(&c.name),
            Decl::TypeAlias(a) => Some(&a.name),
            Decl::File(_) => None,
            Decl::Other(o) => o.name.as_deref(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Function(f) => f.span,
            Decl::Property(p) => p.span,
            Decl::Class(c) => c.span,
            Decl::TypeAlias(a) => a.span,
            Decl::File(f) => f.span,
            Decl::Other(o) => o.span,
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            Decl::Function(f) => f.symbol,
            Decl::Property(p) => p.symbol,
            Decl::Class(c) => c.symbol,
            Decl::TypeAlias(a) => a.symbol,
            Decl::File(_) | Decl::Other(_) => None,
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            Decl::Function(f) => f.marker,
            Decl::Property(p) => p.marker,
            Decl::Class(c) => c.marker,
            Decl::TypeAlias(a) => a.marker,
            Decl::File(_) | Decl::Other(_) => None,
        }
    }

    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            Decl::Function(f) => Some(f.visibility),
            Decl::Property(p) => Some(p.visibility),
            Decl::Class(c) => Some(c.visibility),
            Decl::TypeAlias(a) => Some(a.visibility),
            Decl::File(_) | Decl::Other(_) => None,
        }
    }

    pub fn container(&self) -> Option<ContainerKind> {
        match self {
            Decl::Function(f) => Some(f.container),
            Decl::Property(p) => Some(p.container),
            Decl::Class(c) => Some(c.container),
            Decl::TypeAlias(a) => Some(a.container),
            Decl::File(_) | Decl::Other(_) => None,
        }
    }

    /// The file this declaration was written in.
    pub fn file(&self) -> Option<FileId> {
        match self {
            Decl::Function(f) => Some(f.file),
            Decl::Property(p) => Some(p.file),
            Decl::Class(c) => Some(c.file),
            Decl::TypeAlias(a) => Some(a.file),
            Decl::File(f) => Some(f.id),
            Decl::Other(o) => Some(o.file),
        }
    }
}

impl From<FuncDecl> for Decl {
    fn from(decl: FuncDecl) -> Self {
        Decl::Function(decl)
    }
}

impl From<PropertyDecl> for Decl {
    fn from(decl: PropertyDecl) -> Self {
        Decl::Property(decl)
    }
}

impl From<ClassDecl> for Decl {
    fn from(decl: ClassDecl) -> Self {
        Decl::Class(decl)
    }
}

impl From<TypeAliasDecl> for Decl {
    fn from(decl: TypeAliasDecl) -> Self {
        Decl::TypeAlias(decl)
    }
}

impl From<OtherDecl> for Decl {
    fn from(decl: OtherDecl) -> Self {
        Decl::Other(decl)
    }
}

impl From<SourceFile> for Decl {
    fn from(file: SourceFile) -> Self {
        Decl::File(file)
    }
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, file: FileId) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            type_params: 0,
            span: Span::default(),
            symbol: None,
            marker: None,
            visibility: Visibility::Public,
            container: ContainerKind::TopLevel,
            file,
        }
    }

    pub fn with_param(mut self, name: &str, ty: &str) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    pub fn with_vararg_param(mut self, name: &str, ty: &str) -> Self {
        self.params.push(Param::vararg(name, ty));
        self
    }

    pub fn with_type_params(mut self, count: u32) -> Self {
        self.type_params = count;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_container(mut self, container: ContainerKind) -> Self {
        self.container = container;
        self
    }
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, file: FileId) -> Self {
        Self {
            name: name.into(),
            ty: None,
            mutable: false,
            span: Span::default(),
            symbol: None,
            marker: None,
            visibility: Visibility::Public,
            container: ContainerKind::TopLevel,
            file,
        }
    }

    pub fn with_type(mut self, ty: &str) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_container(mut self, container: ContainerKind) -> Self {
        self.container = container;
        self
    }
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, file: FileId) -> Self {
        Self {
            name: name.into(),
            type_params: 0,
            members: Vec::new(),
            span: Span::default(),
            symbol: None,
            marker: None,
            visibility: Visibility::Public,
            container: ContainerKind::TopLevel,
            file,
        }
    }

    pub fn with_member(mut self, member: impl Into<Decl>) -> Self {
        self.members.push(Arc::new(member.into()));
        self
    }

    pub fn with_type_params(mut self, count: u32) -> Self {
        self.type_params = count;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl TypeAliasDecl {
    pub fn new(name: impl Into<String>, file: FileId) -> Self {
        Self {
            name: name.into(),
            type_params: 0,
            span: Span::default(),
            symbol: None,
            marker: None,
            visibility: Visibility::Public,
            container: ContainerKind::TopLevel,
            file,
        }
    }

    pub fn with_type_params(mut self, count: u32) -> Self {
        self.type_params = count;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl SourceFile {
    pub fn new(id: FileId, package: impl Into<String>) -> Self {
        Self {
            id,
            package: package.into(),
            span: Span::default(),
            declarations: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn push(&mut self, decl: impl Into<Decl>) {
        self.declarations.push(Arc::new(decl.into()));
    }
}
