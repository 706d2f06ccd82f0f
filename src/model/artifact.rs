//! Model artifact exported from the training environment.
//!
//! The artifact is a dictionary of the fitted linear regression parameters,
//! either pickled (the default) or, for `.json` files, JSON-encoded.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{Feature, N_FEATURES};
use crate::model::linear::LinearRegression;
use crate::prelude::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct Artifact {
    /// Column names the model was fit on, in order.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Pickle,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pickle,
        }
    }
}

pub fn load(path: &Path) -> Result<LinearRegression> {
    let format = Format::from_path(path);
    debug!(?format, "reading the artifact…");
    let bytes = fs::read(path).map_err(|error| Error::model_load(path, error))?;
    let artifact: Artifact = match format {
        Format::Json => serde_json::from_slice(&bytes).map_err(|error| Error::model_load(path, error))?,
        Format::Pickle => serde_pickle::from_slice(&bytes, Default::default())
            .map_err(|error| Error::model_load(path, error))?,
    };
    artifact
        .into_model()
        .map_err(|reason| Error::model_load(path, reason))
}

impl Artifact {
    fn into_model(self) -> StdResult<LinearRegression, String> {
        if let Some(feature_names) = &self.feature_names {
            let expected = Feature::ALL.map(Feature::name);
            if feature_names.iter().map(String::as_str).ne(expected) {
                return Err(format!(
                    "the model was fit on {:?}, expected {:?}",
                    feature_names, expected,
                ));
            }
        }
        if self.coefficients.len() != N_FEATURES {
            warn!(
                n_coefficients = self.coefficients.len(),
                "the model does not take {} features, every prediction will be rejected",
                N_FEATURES,
            );
        }
        Ok(LinearRegression::new(self.coefficients, self.intercept))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn artifact(feature_names: Option<Vec<&str>>) -> Artifact {
        Artifact {
            feature_names: feature_names
                .map(|names| names.into_iter().map(String::from).collect()),
            coefficients: vec![150.0, 10000.0, 5000.0, 2500.0],
            intercept: 25000.0,
        }
    }

    fn write_temp(suffix: &str, bytes: &[u8]) -> anyhow::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn format_from_path_ok() {
        assert_eq!(Format::from_path(Path::new("model.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("house_price_model.pkl")), Format::Pickle);
        assert_eq!(Format::from_path(Path::new("model")), Format::Pickle);
    }

    #[test]
    fn load_pickle_ok() -> anyhow::Result<()> {
        let names = vec!["Size", "Bedrooms", "Bathrooms", "Garage"];
        let bytes = serde_pickle::to_vec(&artifact(Some(names)), Default::default())?;
        let file = write_temp(".pkl", &bytes)?;
        let model = load(file.path())?;
        assert_eq!(model, LinearRegression::new(vec![150.0, 10000.0, 5000.0, 2500.0], 25000.0));
        Ok(())
    }

    #[test]
    fn load_json_without_names_ok() -> anyhow::Result<()> {
        let file = write_temp(".json", br#"{"coefficients": [1, 2, 3, 4], "intercept": 0.5}"#)?;
        let model = load(file.path())?;
        assert_eq!(model, LinearRegression::new(vec![1.0, 2.0, 3.0, 4.0], 0.5));
        Ok(())
    }

    #[test]
    fn missing_file_fails() {
        let result = load(Path::new("/nonexistent/house_price_model.pkl"));
        assert!(matches!(result, Err(Error::ModelLoad { .. })));
    }

    #[test]
    fn corrupt_pickle_fails() -> anyhow::Result<()> {
        let file = write_temp(".pkl", b"definitely not a pickle")?;
        assert!(matches!(load(file.path()), Err(Error::ModelLoad { .. })));
        Ok(())
    }

    #[test]
    fn wrong_feature_order_fails() -> anyhow::Result<()> {
        let names = vec!["Bedrooms", "Size", "Bathrooms", "Garage"];
        let bytes = serde_json::to_vec(&artifact(Some(names)))?;
        let file = write_temp(".json", &bytes)?;
        assert!(matches!(load(file.path()), Err(Error::ModelLoad { .. })));
        Ok(())
    }
}
