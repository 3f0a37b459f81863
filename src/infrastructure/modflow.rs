//! Concrete MODFLOW model host.
//!
//! Keeps the package list a model carries and enforces that no two
//! package files share a unit number.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, ModelHost, ModelSettings, ModflowVersion, PackageHandle, Result};

/// A MODFLOW model that packages attach to.
#[derive(Debug, Clone)]
pub struct Modflow {
    name: String,
    model_ws: PathBuf,
    version: ModflowVersion,
    verbose: bool,
    packages: Vec<PackageHandle>,
}

impl Modflow {
    /// Creates an empty model.
    #[must_use]
    pub fn new(name: impl Into<String>, model_ws: impl Into<PathBuf>, version: ModflowVersion) -> Self {
        Self {
            name: name.into(),
            model_ws: model_ws.into(),
            version,
            verbose: false,
            packages: Vec::new(),
        }
    }

    /// Creates a model from configuration settings.
    #[must_use]
    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self::new(settings.name.clone(), settings.model_ws.clone(), settings.version)
            .with_verbose(settings.verbose)
    }

    /// Enable or disable load notices.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Packages currently attached, in insertion order.
    #[must_use]
    pub fn packages(&self) -> &[PackageHandle] {
        &self.packages
    }
}

impl ModelHost for Modflow {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_ws(&self) -> &Path {
        &self.model_ws
    }

    fn version(&self) -> ModflowVersion {
        self.version
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn add_package(&mut self, package: &PackageHandle) -> Result<()> {
        let file_type = package.name();

        for unit in &package.unit_numbers {
            let clash = self.packages.iter().find(|p| {
                !p.name().eq_ignore_ascii_case(file_type) && p.unit_numbers.contains(unit)
            });
            if let Some(existing) = clash {
                return Err(AppError::Registration {
                    message: format!(
                        "unit {unit} for {file_type} is already used by {}",
                        existing.name()
                    ),
                });
            }
        }

        if let Some(slot) = self
            .packages
            .iter_mut()
            .find(|p| p.name().eq_ignore_ascii_case(file_type))
        {
            tracing::warn!(file_type, "Replacing existing package");
            *slot = package.clone();
        } else {
            tracing::debug!(file_type, unit = package.unit_number(), "Package added");
            self.packages.push(package.clone());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::PackageSpec;
    use crate::domain::{LinkageConfig, LinkageOptions};

    fn handle(model: &Modflow, file_type: &str, unit: i32) -> PackageHandle {
        PackageHandle::register(
            model,
            PackageSpec {
                extension: file_type.to_lowercase(),
                file_types: vec![file_type.to_string()],
                unit_numbers: vec![unit],
                extra: vec![String::new()],
                file_names: vec![None],
            },
        )
        .unwrap()
    }

    #[test]
    fn test_attach_lmt() {
        let mut model = Modflow::new("demo", "ws", ModflowVersion::Mf2005);
        let lmt = LinkageConfig::new(&model, LinkageOptions::default()).unwrap();
        lmt.attach(&mut model).unwrap();

        let pkg = &model.packages()[0];
        assert_eq!(pkg.name(), "LMT6");
        assert_eq!(pkg.unit_number(), 30);
        assert_eq!(pkg.fn_path, PathBuf::from("ws/demo.lmt6"));
    }

    #[test]
    fn test_same_type_replaces() {
        let mut model = Modflow::new("demo", ".", ModflowVersion::Mf2005);
        let first = handle(&model, "LMT6", 30);
        let second = handle(&model, "LMT6", 31);
        model.add_package(&first).unwrap();
        model.add_package(&second).unwrap();

        assert_eq!(model.packages().len(), 1);
        assert_eq!(model.packages()[0].unit_number(), 31);
    }

    #[test]
    fn test_unit_collision_rejected() {
        let mut model = Modflow::new("demo", ".", ModflowVersion::Mf2005);
        let bas = handle(&model, "BAS6", 30);
        model.add_package(&bas).unwrap();

        let lmt = LinkageConfig::new(&model, LinkageOptions::default()).unwrap();
        let result = lmt.attach(&mut model);
        assert!(matches!(result, Err(AppError::Registration { .. })));
        assert_eq!(model.packages().len(), 1);
    }

    #[test]
    fn test_from_settings() {
        let settings = ModelSettings {
            verbose: true,
            version: ModflowVersion::Mfusg,
            ..ModelSettings::default()
        };
        let model = Modflow::from_settings(&settings);
        assert!(model.verbose());
        assert_eq!(model.name(), "modflowtest");
        assert_eq!(model.version(), ModflowVersion::Mfusg);
    }
}
