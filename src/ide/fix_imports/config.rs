//! Fix run configuration.

/// Knobs for one fix run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FixImportsConfig {
    /// Also emit a notice for references no namespace can bind.
    pub report_unresolved: bool,
    /// Iteration budget per initially unresolved reference.
    pub iteration_factor: usize,
    /// Absolute iteration budget; overrides `iteration_factor`.
    pub max_iterations: Option<usize>,
}

impl Default for FixImportsConfig {
    fn default() -> Self {
        Self {
            report_unresolved: false,
            iteration_factor: 3,
            max_iterations: None,
        }
    }
}

impl FixImportsConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report references without candidates.
    pub fn with_report_unresolved(mut self, report: bool) -> Self {
        self.report_unresolved = report;
        self
    }

    /// Budget iterations per initially unresolved reference.
    pub fn with_iteration_factor(mut self, factor: usize) -> Self {
        self.iteration_factor = factor;
        self
    }

    /// Cap iterations outright.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Iterations allowed for a buffer starting with `unresolved` references.
    pub fn iteration_budget(&self, unresolved: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| self.iteration_factor.saturating_mul(unresolved.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_scales_with_references() {
        let config = FixImportsConfig::default();
        assert_eq!(config.iteration_budget(0), 3);
        assert_eq!(config.iteration_budget(4), 12);
    }

    #[test]
    fn test_explicit_cap_wins() {
        let config = FixImportsConfig::new()
            .with_iteration_factor(10)
            .with_max_iterations(2)
            .with_report_unresolved(true);
        assert_eq!(config.iteration_budget(100), 2);
        assert!(config.report_unresolved);
    }
}
