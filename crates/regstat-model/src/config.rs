//! Directory configuration for the dashboard and the converter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{ModelError, Result};

/// Where datasets are read from and where converted files go.
///
/// Every field has a default matching the standard on-disk layout, so a
/// config file only needs to name what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Folder holding one sub-folder of CSV files per dataset.
    pub data_root: PathBuf,
    /// Folder holding one sub-folder of spreadsheets per dataset.
    pub input_root: PathBuf,
    /// Converter output root; mirrors the input sub-folders.
    pub output_root: PathBuf,
    pub enrolment_folder: String,
    pub demographic_folder: String,
    pub biometric_folder: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            input_root: PathBuf::new(),
            output_root: PathBuf::from("data_csv_converted"),
            enrolment_folder: Dataset::Enrolment.default_folder().to_string(),
            demographic_folder: Dataset::Demographic.default_folder().to_string(),
            biometric_folder: Dataset::Biometric.default_folder().to_string(),
        }
    }
}

impl DashboardConfig {
    /// Loads a JSON config file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ModelError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_data_root(mut self, root: PathBuf) -> Self {
        self.data_root = root;
        self
    }

    #[must_use]
    pub fn with_input_root(mut self, root: PathBuf) -> Self {
        self.input_root = root;
        self
    }

    #[must_use]
    pub fn with_output_root(mut self, root: PathBuf) -> Self {
        self.output_root = root;
        self
    }

    pub fn folder_name(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Enrolment => &self.enrolment_folder,
            Dataset::Demographic => &self.demographic_folder,
            Dataset::Biometric => &self.biometric_folder,
        }
    }

    /// Folder the loader reads for `dataset`.
    pub fn dataset_dir(&self, dataset: Dataset) -> PathBuf {
        self.data_root.join(self.folder_name(dataset))
    }

    /// Sub-folder names the converter walks, in dataset order.
    pub fn folder_names(&self) -> Vec<String> {
        Dataset::ALL
            .iter()
            .map(|dataset| self.folder_name(*dataset).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.dataset_dir(Dataset::Biometric),
            PathBuf::from("data/api_data_aadhar_biometric")
        );
        assert_eq!(config.folder_names().len(), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "data_root": "/srv/stats" }"#).unwrap();
        assert_eq!(config.data_root, PathBuf::from("/srv/stats"));
        assert_eq!(config.output_root, PathBuf::from("data_csv_converted"));
        assert_eq!(config.enrolment_folder, "api_data_aadhar_enrolment");
    }
}
