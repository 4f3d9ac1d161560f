//! Dataset categories.
//!
//! The dashboard reads three independent folders of pre-aggregated records.
//! Each category knows its folder name and the columns its views rely on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the three registration datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// New enrolments by age bucket.
    Enrolment,
    /// Demographic detail updates by age bucket.
    Demographic,
    /// Biometric updates by age bucket, state and district.
    Biometric,
}

impl Dataset {
    /// All datasets in load order.
    pub const ALL: [Dataset; 3] = [Dataset::Enrolment, Dataset::Demographic, Dataset::Biometric];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Enrolment => "enrolment",
            Dataset::Demographic => "demographic",
            Dataset::Biometric => "biometric",
        }
    }

    /// Default folder name under the data root.
    pub fn default_folder(&self) -> &'static str {
        match self {
            Dataset::Enrolment => "api_data_aadhar_enrolment",
            Dataset::Demographic => "api_data_aadhar_demographic",
            Dataset::Biometric => "api_data_aadhar_biometric",
        }
    }

    /// Human-readable label for metric tiles.
    pub fn record_label(&self) -> &'static str {
        match self {
            Dataset::Enrolment => "Total Enrolment Records",
            Dataset::Demographic => "Demographic Update Records",
            Dataset::Biometric => "Biometric Update Records",
        }
    }

    /// Numeric columns the views sum over, in display order.
    ///
    /// Biometric age columns are discovered by name at render time, so the
    /// list is empty for that dataset.
    pub fn age_columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Enrolment => &["age_0_5", "age_5_17", "age_18_greater"],
            Dataset::Demographic => &["demo_age_5_17", "demo_age_17_"],
            Dataset::Biometric => &[],
        }
    }

    /// Categorical columns the views group or filter by.
    pub fn region_columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Biometric => &["state", "district"],
            Dataset::Enrolment | Dataset::Demographic => &[],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Dataset::ALL
            .into_iter()
            .find(|dataset| dataset.as_str() == normalized || dataset.default_folder() == normalized)
            .ok_or_else(|| ModelError::UnknownDataset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_folder() {
        assert_eq!("Biometric".parse::<Dataset>().unwrap(), Dataset::Biometric);
        assert_eq!(
            "api_data_aadhar_enrolment".parse::<Dataset>().unwrap(),
            Dataset::Enrolment
        );
        assert!(matches!(
            "census".parse::<Dataset>(),
            Err(ModelError::UnknownDataset(_))
        ));
    }

    #[test]
    fn biometric_age_columns_are_dynamic() {
        assert!(Dataset::Biometric.age_columns().is_empty());
        assert_eq!(Dataset::Enrolment.age_columns().len(), 3);
    }
}
