use std::fmt;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Why a shader program could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// A stage failed to parse or validate. `diagnostic` is the compiler output.
    Compile {
        stage: ShaderStage,
        diagnostic: String,
    },
    /// Both stages compiled but do not form a usable program.
    Link { reason: String },
}

impl ProgramError {
    /// The human-readable diagnostic text, without the error-kind prefix.
    pub fn diagnostic(&self) -> &str {
        match self {
            ProgramError::Compile { diagnostic, .. } => diagnostic,
            ProgramError::Link { reason } => reason,
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Compile { stage, diagnostic } => {
                write!(f, "{stage} shader failed to compile: {diagnostic}")
            }
            ProgramError::Link { reason } => write!(f, "program failed to link: {reason}"),
        }
    }
}

impl std::error::Error for ProgramError {}
