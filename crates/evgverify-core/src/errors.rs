use evgverify_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and process exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    /// A snapshot section or entity has the wrong shape
    InvalidSnapshot,
    /// A required entity field (e.g. `name`) is absent
    MissingField,

    // Parsing
    /// Evaluated configuration text is not valid YAML
    YamlParse,

    // Integration/IO
    Io,
    NotFound,
    /// An external tool (git, evergreen) failed to run or exited non-zero
    ExternalService,
    /// The working tree could not be restored after reverse-applying the pending patch
    RestoreFailed,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::YamlParse => "ERR_YAML_PARSE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::RestoreFailed => "ERR_RESTORE_FAILED",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context
/// for the single line printed when a run aborts.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    section: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            section: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add configuration section context (`tasks`, `buildvariants`, ...)
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(section) = &self.section {
            write!(f, " (section: {})", section)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for snapshot loading and external tooling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifyError {
    // ===== Snapshot Shape Errors =====
    /// The evaluated configuration root is not a mapping
    #[error("Configuration root must be a mapping, got {found}")]
    SnapshotNotMapping { found: String },

    /// A known section has the wrong container type
    #[error("Section `{section}` must be a {expected}, got {found}")]
    SectionTypeMismatch {
        section: String,
        expected: &'static str,
        found: String,
    },

    /// An entry of a section sequence is not a mapping
    #[error("Entry #{index} of section `{section}` must be a mapping, got {found}")]
    EntityNotMapping {
        section: String,
        index: usize,
        found: String,
    },

    /// An entry of a section sequence has no string `name`
    #[error("Entry #{index} of section `{section}` has no string `name`")]
    EntityMissingName { section: String, index: usize },

    // ===== Parsing Errors =====
    /// Evaluated configuration text could not be parsed
    #[error("YAML parse error: {message}")]
    YamlParse { message: String },

    // ===== Tooling Errors =====
    /// External tool could not be started
    #[error("Failed to run `{tool}`: {message}")]
    ToolSpawn { tool: String, message: String },

    /// External tool exited unsuccessfully
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },
}

/// Conversion from VerifyError to ExError
impl From<VerifyError> for ExError {
    fn from(err: VerifyError) -> Self {
        let message = err.to_string();
        match err {
            VerifyError::SnapshotNotMapping { .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(message)
            }

            VerifyError::SectionTypeMismatch { section, .. }
            | VerifyError::EntityNotMapping { section, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_section(section)
                    .with_message(message)
            }

            VerifyError::EntityMissingName { section, .. } => {
                ExError::new(ExErrorKind::MissingField)
                    .with_section(section)
                    .with_message(message)
            }

            VerifyError::YamlParse { .. } => {
                ExError::new(ExErrorKind::YamlParse).with_message(message)
            }

            VerifyError::ToolSpawn { tool, .. } | VerifyError::ToolFailed { tool, .. } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op(tool)
                    .with_message(message)
            }
        }
    }
}
