use sweep_kernel::Tolerance;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NamingConfig {
    /// Point coincidence used to chain wrap-around edges and to match the
    /// wrap anchor against brep vertices.
    pub tolerance: Tolerance,
}

impl NamingConfig {
    pub fn with_coincidence(coincidence: f64) -> Self {
        Self {
            tolerance: Tolerance { coincidence },
        }
    }
}
