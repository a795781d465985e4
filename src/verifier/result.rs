use crate::error::CredCheckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingConfiguration,
    MissingResource,
    MalformedInput,
    RemoteCallFailure,
    LocalConstructionFailure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::MissingConfiguration => write!(f, "missing configuration"),
            FailureKind::MissingResource => write!(f, "missing resource"),
            FailureKind::MalformedInput => write!(f, "malformed input"),
            FailureKind::RemoteCallFailure => write!(f, "remote call failure"),
            FailureKind::LocalConstructionFailure => write!(f, "local construction failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Success,
    Failure { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Ok,
    Info,
    Warn,
    Error,
}

/// One diagnostic line emitted while a check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLine {
    pub level: LineLevel,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub outcome: CheckOutcome,
    pub lines: Vec<DiagnosticLine>,
}

impl CheckResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CheckOutcome::Success,
            lines: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Success
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            CheckOutcome::Success => None,
            CheckOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn ok(&mut self, text: impl Into<String>) {
        self.push(LineLevel::Ok, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LineLevel::Info, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(LineLevel::Warn, text);
    }

    /// Records an error line and fails the check. The first failure decides
    /// the outcome; later ones only add lines.
    pub fn fail(&mut self, kind: FailureKind, text: impl Into<String>) {
        let text = text.into();
        if self.passed() {
            self.outcome = CheckOutcome::Failure { kind, message: text.clone() };
        }
        self.push(LineLevel::Error, text);
    }

    pub fn fail_with(&mut self, err: &CredCheckError) {
        self.fail(err.kind(), err.to_string());
    }

    fn push(&mut self, level: LineLevel, text: impl Into<String>) {
        self.lines.push(DiagnosticLine { level, text: text.into() });
    }
}

/// Check results in the order the checks ran.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    results: Vec<CheckResult>,
}

impl VerificationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed())
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}
