//! Package bookkeeping and the model-host seam.
//!
//! Every MODFLOW package owns a [`PackageHandle`] describing its input
//! file (extension, file type, unit number, resolved path). The model a
//! package belongs to is reached only through [`ModelHost`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{AppError, ModflowVersion, Result};

/// The model a package attaches to.
pub trait ModelHost {
    /// Model name; used to derive default package file names.
    fn name(&self) -> &str;

    /// Directory package files are written to.
    fn model_ws(&self) -> &Path;

    /// MODFLOW variant the model targets.
    fn version(&self) -> ModflowVersion;

    /// Whether load notices should be emitted.
    fn verbose(&self) -> bool;

    /// Adds a package to the model's package list.
    ///
    /// # Errors
    /// Returns [`AppError::Registration`] if the package cannot be added.
    fn add_package(&mut self, package: &PackageHandle) -> Result<()>;

    /// Resolves `file_type` against an external unit table.
    ///
    /// A matching entry is consumed. Returns the unit number and the base
    /// name of the associated file, if any.
    fn ext_unit_attr(
        &self,
        table: &mut ExtUnitTable,
        file_type: &str,
    ) -> Option<(i32, Option<String>)> {
        table.take_by_file_type(file_type).map(|entry| {
            let file_name = Path::new(&entry.file_name)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            (entry.unit, file_name)
        })
    }
}

/// Registration request for a package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub extension: String,
    pub file_types: Vec<String>,
    pub unit_numbers: Vec<i32>,
    pub extra: Vec<String>,
    pub file_names: Vec<Option<String>>,
}

/// Registered package file bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageHandle {
    pub extension: String,
    pub file_types: Vec<String>,
    pub unit_numbers: Vec<i32>,
    pub extra: Vec<String>,
    pub file_names: Vec<String>,
    /// Full path of the package input file.
    pub fn_path: PathBuf,
}

impl PackageHandle {
    /// Registers a package file against `model`.
    ///
    /// Unset file names default to `<model name>.<extension>`.
    ///
    /// # Errors
    /// Returns [`AppError::Registration`] if the request is inconsistent or a
    /// unit number is not positive.
    pub fn register<M: ModelHost + ?Sized>(model: &M, spec: PackageSpec) -> Result<Self> {
        if spec.file_types.is_empty() || spec.file_types.len() != spec.unit_numbers.len() {
            return Err(AppError::Registration {
                message: format!(
                    "{} file type(s) but {} unit number(s)",
                    spec.file_types.len(),
                    spec.unit_numbers.len()
                ),
            });
        }

        if let Some(unit) = spec.unit_numbers.iter().find(|u| **u <= 0) {
            return Err(AppError::Registration {
                message: format!("invalid unit number {unit} for {}", spec.file_types[0]),
            });
        }

        let file_names: Vec<String> = spec
            .file_types
            .iter()
            .enumerate()
            .map(|(i, _)| {
                spec.file_names
                    .get(i)
                    .cloned()
                    .flatten()
                    .unwrap_or_else(|| format!("{}.{}", model.name(), spec.extension))
            })
            .collect();

        let fn_path = model.model_ws().join(&file_names[0]);

        tracing::debug!(
            file_type = %spec.file_types[0],
            unit = spec.unit_numbers[0],
            path = %fn_path.display(),
            "Registered package file"
        );

        Ok(Self {
            extension: spec.extension,
            file_types: spec.file_types,
            unit_numbers: spec.unit_numbers,
            extra: spec.extra,
            file_names,
            fn_path,
        })
    }

    /// Declared package name (the first file type).
    #[must_use]
    pub fn name(&self) -> &str {
        self.file_types.first().map_or("", String::as_str)
    }

    /// Primary unit number.
    #[must_use]
    pub fn unit_number(&self) -> i32 {
        self.unit_numbers.first().copied().unwrap_or_default()
    }

    /// Primary file name, relative to the model workspace.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_names.first().map_or("", String::as_str)
    }
}

/// One file association from a name file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameFileEntry {
    pub file_type: String,
    pub unit: i32,
    pub file_name: String,
}

/// External unit table: unit number to file association.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtUnitTable {
    entries: BTreeMap<i32, NameFileEntry>,
}

impl ExtUnitTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry on the same unit.
    pub fn insert(&mut self, entry: NameFileEntry) -> Option<NameFileEntry> {
        self.entries.insert(entry.unit, entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns the lowest-unit entry of `file_type`.
    pub fn take_by_file_type(&mut self, file_type: &str) -> Option<NameFileEntry> {
        let unit = self
            .entries
            .values()
            .find(|e| e.file_type.eq_ignore_ascii_case(file_type))
            .map(|e| e.unit)?;
        self.entries.remove(&unit)
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory model host for unit tests.

    use super::*;

    #[derive(Debug)]
    pub struct StubModel {
        pub name: String,
        pub model_ws: PathBuf,
        pub version: ModflowVersion,
        pub verbose: bool,
        pub added: Vec<(String, i32)>,
    }

    impl Default for StubModel {
        fn default() -> Self {
            Self {
                name: "modflowtest".to_string(),
                model_ws: PathBuf::from("."),
                version: ModflowVersion::Mf2005,
                verbose: false,
                added: Vec::new(),
            }
        }
    }

    impl ModelHost for StubModel {
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
            self.added
                .push((package.name().to_string(), package.unit_number()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubModel;
    use super::*;

    fn lmt_spec(file_name: Option<&str>) -> PackageSpec {
        PackageSpec {
            extension: "lmt6".to_string(),
            file_types: vec!["LMT6".to_string()],
            unit_numbers: vec![30],
            extra: vec![String::new()],
            file_names: vec![file_name.map(str::to_string)],
        }
    }

    #[test]
    fn test_register_default_file_name() {
        let model = StubModel {
            model_ws: PathBuf::from("work"),
            ..StubModel::default()
        };
        let handle = PackageHandle::register(&model, lmt_spec(None)).unwrap();
        assert_eq!(handle.file_name(), "modflowtest.lmt6");
        assert_eq!(handle.fn_path, PathBuf::from("work/modflowtest.lmt6"));
        assert_eq!(handle.name(), "LMT6");
    }

    #[test]
    fn test_register_explicit_file_name() {
        let model = StubModel::default();
        let handle = PackageHandle::register(&model, lmt_spec(Some("link.lmt"))).unwrap();
        assert_eq!(handle.file_name(), "link.lmt");
    }

    #[test]
    fn test_register_rejects_bad_unit() {
        let model = StubModel::default();
        let mut spec = lmt_spec(None);
        spec.unit_numbers = vec![0];
        assert!(matches!(
            PackageHandle::register(&model, spec),
            Err(AppError::Registration { .. })
        ));
    }

    #[test]
    fn test_ext_unit_attr_consumes_entry() {
        let model = StubModel::default();
        let mut table = ExtUnitTable::new();
        table.insert(NameFileEntry {
            file_type: "LMT6".to_string(),
            unit: 44,
            file_name: "input/model.lmt".to_string(),
        });
        table.insert(NameFileEntry {
            file_type: "BAS6".to_string(),
            unit: 1,
            file_name: "model.bas".to_string(),
        });

        let found = model.ext_unit_attr(&mut table, "lmt6");
        assert_eq!(found, Some((44, Some("model.lmt".to_string()))));
        assert_eq!(table.len(), 1);
        assert_eq!(model.ext_unit_attr(&mut table, "LMT6"), None);
    }
}
