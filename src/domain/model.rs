use std::path::PathBuf;

/// Purpose-specific names collected for one SDK service. Each kind of name
/// supports a different piece of the generated client file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Directory name under service/ (example: "ec2").
    pub package_name: String,
    /// Subpackage holding the trait declaration (example: "ec2iface").
    pub interface_package: String,
    /// Bare trait name, used for type assertions (example: "Ec2Api").
    pub interface_short: String,
    /// Qualified reference from generated code (example: "ec2iface::Ec2Api").
    pub interface_qualified: String,
    /// Display name, the trait name with its trailing Api suffix stripped.
    pub proper_name: String,
}

/// The reduced engine configuration used by this command.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub dir: PathBuf,
    pub name: String,
    pub in_package: bool,
}

/// Raw generated source, not yet valid as a standalone file.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredKind {
    Struct,
    Enum,
    Trait,
    Alias,
    Union,
}

/// One type declaration in document order, as produced by the locator's walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: String,
    pub kind: DeclaredKind,
}
