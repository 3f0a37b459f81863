//! Domain models for the Link-MT3DMS (LMT) package.
//!
//! These models hold the handful of settings that describe how the
//! flow-transport link (FTL) file should be produced by MODFLOW.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::package::{ModelHost, PackageHandle, PackageSpec};
use super::Result;

/// Flow terms from optional packages that may be added to the FTL file.
///
/// The declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFlow {
    /// Streamflow-routing package.
    Sfr,
    /// Lake package.
    Lak,
    /// Unsaturated-zone flow package.
    Uzf,
}

impl PackageFlow {
    /// All recognized flows in canonical order.
    pub const ALL: [Self; 3] = [Self::Sfr, Self::Lak, Self::Uzf];

    /// Keyword used in the input deck.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Sfr => "SFR",
            Self::Lak => "LAK",
            Self::Uzf => "UZF",
        }
    }
}

impl std::str::FromStr for PackageFlow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sfr" => Ok(Self::Sfr),
            "lak" => Ok(Self::Lak),
            "uzf" => Ok(Self::Uzf),
            _ => Err(format!("Unknown package flow: {s}. Use: sfr, lak, uzf")),
        }
    }
}

/// MODFLOW variant the owning model targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModflowVersion {
    Mf2k,
    #[default]
    Mf2005,
    Mfnwt,
    Mfusg,
}

impl ModflowVersion {
    /// Human-readable label used in package headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mf2k => "MODFLOW-2000",
            Self::Mf2005 => "MODFLOW-2005",
            Self::Mfnwt => "MODFLOW-NWT",
            Self::Mfusg => "MODFLOW-USG",
        }
    }
}

impl std::str::FromStr for ModflowVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mf2k" => Ok(Self::Mf2k),
            "mf2005" => Ok(Self::Mf2005),
            "mfnwt" => Ok(Self::Mfnwt),
            "mfusg" => Ok(Self::Mfusg),
            _ => Err(format!(
                "Unknown MODFLOW version: {s}. Use: mf2k, mf2005, mfnwt, mfusg"
            )),
        }
    }
}

/// Optional construction parameters for [`LinkageConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageOptions {
    pub output_file_name: String,
    pub output_file_unit: i64,
    pub output_file_header: String,
    pub output_file_format: String,
    /// Raw package-flow tokens; matched case-insensitively on write.
    pub package_flows: Vec<String>,
    pub extension: String,
    /// Package unit number; [`LinkageConfig::default_unit`] when absent.
    pub unit_number: Option<i32>,
    /// Target file names; only the first entry is used.
    pub filenames: Vec<Option<String>>,
}

impl Default for LinkageOptions {
    fn default() -> Self {
        Self {
            output_file_name: "mt3d_link.ftl".to_string(),
            output_file_unit: 54,
            output_file_header: "extended".to_string(),
            output_file_format: "unformatted".to_string(),
            package_flows: Vec::new(),
            extension: "lmt6".to_string(),
            unit_number: None,
            filenames: vec![None],
        }
    }
}

impl LinkageOptions {
    /// Set a single target file name.
    #[must_use]
    pub fn with_filename(mut self, name: impl Into<String>) -> Self {
        self.filenames = vec![Some(name.into())];
        self
    }
}

/// The LMT package: settings for the flow-transport link file.
#[derive(Debug, Clone, Serialize)]
pub struct LinkageConfig {
    /// Bookkeeping shared with every package (extension, unit, path).
    pub package: PackageHandle,
    /// Comment line written at the top of the package file.
    pub heading: String,
    pub output_file_name: String,
    /// Unit of the FTL file itself, independent of `package.unit_number()`.
    pub output_file_unit: i64,
    pub output_file_header: String,
    pub output_file_format: String,
    pub package_flows: Vec<String>,
}

impl LinkageConfig {
    /// File type tag used in name files and for self-registration.
    pub const FILE_TYPE: &'static str = "LMT6";

    /// Unit number used when none is supplied.
    pub const DEFAULT_UNIT: i32 = 30;

    /// Returns the file type tag (`LMT6`).
    #[must_use]
    pub const fn file_type() -> &'static str {
        Self::FILE_TYPE
    }

    /// Returns the default package unit number (30).
    #[must_use]
    pub const fn default_unit() -> i32 {
        Self::DEFAULT_UNIT
    }

    /// Builds a new LMT package for `model`.
    ///
    /// Registers the package file with the bookkeeping layer but does not
    /// attach it to the model; call [`LinkageConfig::attach`] for that.
    ///
    /// # Errors
    /// Propagates any error raised by package registration.
    pub fn new<M: ModelHost + ?Sized>(model: &M, options: LinkageOptions) -> Result<Self> {
        let unit_number = options.unit_number.unwrap_or_else(Self::default_unit);
        let file_name = options.filenames.into_iter().next().flatten();

        let spec = PackageSpec {
            extension: options.extension,
            file_types: vec![Self::FILE_TYPE.to_string()],
            unit_numbers: vec![unit_number],
            extra: vec![String::new()],
            file_names: vec![file_name],
        };
        let package = PackageHandle::register(model, spec)?;

        let heading = format!(
            "# {} package for {}, generated by lmt-config.",
            package.name(),
            model.version().label()
        );

        Ok(Self {
            package,
            heading,
            output_file_name: options.output_file_name,
            output_file_unit: options.output_file_unit,
            output_file_header: options.output_file_header,
            output_file_format: options.output_file_format,
            package_flows: options.package_flows,
        })
    }

    /// Adds this package to the model's package list.
    ///
    /// # Errors
    /// Returns whatever the model raises, e.g. a unit-number collision.
    pub fn attach<M: ModelHost + ?Sized>(&self, model: &mut M) -> Result<()> {
        model.add_package(&self.package)
    }

    /// Recognized package flows, de-duplicated, in canonical order.
    #[must_use]
    pub fn recognized_flows(&self) -> Vec<PackageFlow> {
        PackageFlow::ALL
            .into_iter()
            .filter(|flow| {
                self.package_flows
                    .iter()
                    .any(|token| token.parse::<PackageFlow>().is_ok_and(|f| f == *flow))
            })
            .collect()
    }

    /// Resolved path of the package input file.
    #[must_use]
    pub fn fn_path(&self) -> &Path {
        &self.package.fn_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::testing::StubModel;

    #[test]
    fn test_default_construction() {
        let model = StubModel::default();
        let lmt = LinkageConfig::new(&model, LinkageOptions::default()).unwrap();

        assert_eq!(lmt.output_file_name, "mt3d_link.ftl");
        assert_eq!(lmt.output_file_unit, 54);
        assert_eq!(lmt.output_file_header, "extended");
        assert_eq!(lmt.output_file_format, "unformatted");
        assert!(lmt.package_flows.is_empty());
        assert_eq!(lmt.package.unit_number(), 30);
        assert_eq!(lmt.package.extension, "lmt6");
    }

    #[test]
    fn test_construction_does_not_attach() {
        let mut model = StubModel::default();
        let lmt = LinkageConfig::new(&model, LinkageOptions::default()).unwrap();
        assert!(model.added.is_empty());

        lmt.attach(&mut model).unwrap();
        assert_eq!(model.added, vec![("LMT6".to_string(), 30)]);
    }

    #[test]
    fn test_heading_embeds_name_and_version() {
        let model = StubModel {
            version: ModflowVersion::Mfnwt,
            ..StubModel::default()
        };
        let lmt = LinkageConfig::new(&model, LinkageOptions::default()).unwrap();
        assert_eq!(
            lmt.heading,
            "# LMT6 package for MODFLOW-NWT, generated by lmt-config."
        );
    }

    #[test]
    fn test_units_are_independent() {
        let model = StubModel::default();
        let options = LinkageOptions {
            output_file_unit: 30,
            unit_number: Some(77),
            ..LinkageOptions::default()
        };
        let lmt = LinkageConfig::new(&model, options).unwrap();
        assert_eq!(lmt.output_file_unit, 30);
        assert_eq!(lmt.package.unit_number(), 77);
    }

    #[test]
    fn test_default_options_do_not_share_flows() {
        let mut first = LinkageOptions::default();
        first.package_flows.push("sfr".to_string());
        let second = LinkageOptions::default();
        assert!(second.package_flows.is_empty());
    }

    #[test]
    fn test_recognized_flows_canonical_order() {
        let model = StubModel::default();
        let options = LinkageOptions {
            package_flows: vec!["UZF".into(), "foo".into(), "sfr".into(), "Sfr".into()],
            ..LinkageOptions::default()
        };
        let lmt = LinkageConfig::new(&model, options).unwrap();
        assert_eq!(
            lmt.recognized_flows(),
            vec![PackageFlow::Sfr, PackageFlow::Uzf]
        );
        // Unrecognized tokens are kept in memory.
        assert_eq!(lmt.package_flows.len(), 4);
    }

    #[test]
    fn test_static_metadata() {
        assert_eq!(LinkageConfig::file_type(), "LMT6");
        assert_eq!(LinkageConfig::default_unit(), 30);
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("MF2005".parse::<ModflowVersion>(), Ok(ModflowVersion::Mf2005));
        assert_eq!(ModflowVersion::Mfusg.label(), "MODFLOW-USG");
        assert!("mf6".parse::<ModflowVersion>().is_err());
    }
}
