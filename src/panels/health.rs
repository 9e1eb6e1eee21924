pub const CHECK_LABEL: &str = "Check Backend Health";
pub const CHECKING_LABEL: &str = "Checking...";

/// Last known backend health.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthState {
    status: Option<String>,
    error: Option<String>,
    loading: bool,
}

impl HealthState {
    /// Starts a check. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub fn succeed(&mut self, status: impl Into<String>) {
        self.loading = false;
        self.status = Some(status.into());
    }

    /// Records a failure; a previously received status stays visible.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.loading = false;
        self.error = Some(error.into());
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            CHECKING_LABEL
        } else {
            CHECK_LABEL
        }
    }

    /// `Backend: <status>` and/or `Error: <message>`.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(status) = &self.status {
            lines.push(format!("Backend: {}", status));
        }
        if let Some(error) = &self.error {
            lines.push(format!("Error: {}", error));
        }
        lines
    }
}
