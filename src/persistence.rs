//! Kernel input and output documents
//!
//! This module reads the JSON description of a scheduling problem (pair
//! coordinates, similarity matrix, fitted parameters) and writes the
//! resulting kernel so that an external sampler can pick it up.

use crate::api::{build_with, PairKernel};
use crate::core::{matrix_from_rows, matrix_to_rows, DppError, Point, PointSet, Result};
use crate::feature::FeatureMode;
use crate::quality::PowerQuality;
use crate::utils::KernelStats;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable description of a kernel construction problem
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KernelInput {
    /// Transmitter coordinates as [x, y]
    pub transmitters: Vec<[f64; 2]>,
    /// Receiver coordinates as [x, y], paired by index
    pub receivers: Vec<[f64; 2]>,
    /// N×N similarity matrix rows
    pub similarity: Vec<Vec<f64>>,
    /// Quality model parameters
    pub theta: Vec<f64>,
    /// Number of features, 0 for none
    #[serde(default)]
    pub feature_count: usize,
    /// Exponent of the |v|^p quality function, 2 if absent
    #[serde(default)]
    pub power: Option<f64>,
}

impl KernelInput {
    /// Load an input document from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DppError::IoError)?;
        let reader = BufReader::new(file);
        let input = serde_json::from_reader(reader)
            .map_err(|e| DppError::SerializationError(e.to_string()))?;
        Ok(input)
    }

    /// Save the input document to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(DppError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DppError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Pair locations as a point set
    pub fn points(&self) -> Result<PointSet> {
        fn to_points(coords: &[[f64; 2]]) -> Vec<Point> {
            coords.iter().map(|&[x, y]| Point::new(x, y)).collect()
        }
        PointSet::new(to_points(&self.transmitters), to_points(&self.receivers))
    }

    /// Similarity matrix in dense form
    pub fn similarity_matrix(&self) -> Result<Array2<f64>> {
        matrix_from_rows(&self.similarity)
    }

    /// Quality function described by the document
    pub fn quality(&self) -> Result<PowerQuality> {
        match self.power {
            None => Ok(PowerQuality::default()),
            Some(p) if p.is_finite() && p >= PowerQuality::MIN_POWER => Ok(PowerQuality::new(p)),
            Some(p) => Err(DppError::InvalidParameter(format!(
                "quality power must be at least 2, got {p}"
            ))),
        }
    }

    /// Build the kernel described by the document
    pub fn build(&self) -> Result<PairKernel> {
        let mode =
            FeatureMode::resolve(self.feature_count, self.theta.len(), self.transmitters.len())?;
        let quality = self.quality()?;
        let points = self.points()?;
        let similarity = self.similarity_matrix()?;

        build_with(&points, &similarity, &self.theta, mode, &quality)
    }
}

/// Serializable representation of a built kernel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SerializableKernel {
    /// Kernel matrix rows
    pub kernel: Vec<Vec<f64>>,
    /// Quality of each pair
    pub quality: Vec<f64>,
    /// Parameter·feature value of each pair
    pub theta_feature: Vec<f64>,
    /// Resolved feature mode
    pub mode: FeatureMode,
    /// Kernel metadata
    pub metadata: KernelMetadata,
}

/// Metadata for tracking where a kernel came from
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KernelMetadata {
    /// Library version used to build the kernel
    pub library_version: String,
    /// Number of transmitter/receiver pairs
    pub n_pairs: usize,
    /// Effective feature count
    pub feature_count: usize,
    /// Parameters used
    pub theta: Vec<f64>,
    /// Description of the quality function
    pub quality_function: String,
    /// Creation timestamp
    pub created_at: String,
}

impl SerializableKernel {
    /// Create a serializable kernel from a build result
    pub fn from_pair_kernel(result: &PairKernel, theta: &[f64], quality_function: &str) -> Self {
        Self {
            kernel: matrix_to_rows(result.kernel()),
            quality: result.quality().to_vec(),
            theta_feature: result.theta_feature().to_vec(),
            mode: result.mode(),
            metadata: KernelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_pairs: result.len(),
                feature_count: result.feature_count(),
                theta: theta.to_vec(),
                quality_function: quality_function.to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save kernel to file
    ///
    /// JSON has no encoding for NaN or infinity, so a kernel with non-finite
    /// entries is rejected instead of being written lossily.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let all_finite = self
            .kernel
            .iter()
            .flatten()
            .chain(&self.quality)
            .chain(&self.theta_feature)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(DppError::SerializationError(
                "kernel contains non-finite values".to_string(),
            ));
        }

        let file = File::create(path).map_err(DppError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DppError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load kernel from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DppError::IoError)?;
        let reader = BufReader::new(file);
        let kernel = serde_json::from_reader(reader)
            .map_err(|e| DppError::SerializationError(e.to_string()))?;
        Ok(kernel)
    }

    /// Kernel matrix in dense form
    pub fn kernel_matrix(&self) -> Result<Array2<f64>> {
        matrix_from_rows(&self.kernel)
    }

    /// Print kernel summary
    pub fn print_summary(&self) -> Result<()> {
        let stats = KernelStats::compute(&self.kernel_matrix()?, &self.quality);

        println!("=== DPP Kernel Summary ===");
        println!("Pairs: {}", self.metadata.n_pairs);
        println!("Feature Mode: {:?}", self.mode);
        println!("Feature Count: {}", self.metadata.feature_count);
        println!("Theta: {:?}", self.metadata.theta);
        println!("Quality Function: {}", self.metadata.quality_function);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Kernel Statistics:");
        println!("  Trace: {:.6}", stats.trace);
        println!("  Max Asymmetry: {:.3e}", stats.max_asymmetry);
        println!("Quality Statistics:");
        println!("  Min: {:.6}", stats.min_quality);
        println!("  Max: {:.6}", stats.max_quality);
        println!("  Mean: {:.6}", stats.mean_quality);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn sample_input() -> KernelInput {
        KernelInput {
            transmitters: vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]],
            receivers: vec![[1.0, 0.0], [11.0, 0.0], [0.0, 11.0]],
            similarity: vec![
                vec![1.0, 0.1, 0.1],
                vec![0.1, 1.0, 0.1],
                vec![0.1, 0.1, 1.0],
            ],
            theta: vec![1.0, -0.05],
            feature_count: 2,
            power: None,
        }
    }

    #[test]
    fn test_input_build() -> Result<()> {
        let result = sample_input().build()?;
        assert_eq!(result.len(), 3);
        assert_eq!(result.mode(), FeatureMode::NearestNeighbor);
        Ok(())
    }

    #[test]
    fn test_input_roundtrip() -> Result<()> {
        let input = sample_input();
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        input.save_to_file(temp_file.path())?;

        let loaded = KernelInput::load_from_file(temp_file.path())?;
        assert_eq!(loaded, input);
        Ok(())
    }

    #[test]
    fn test_input_defaults() -> Result<()> {
        let json = r#"{
            "transmitters": [[0.0, 0.0]],
            "receivers": [[1.0, 0.0]],
            "similarity": [[1.0]],
            "theta": [2.0]
        }"#;
        let input: KernelInput = serde_json::from_str(json).expect("valid document");
        assert_eq!(input.feature_count, 0);
        assert_eq!(input.power, None);

        let result = input.build()?;
        assert_eq!(result.quality(), &[4.0]);
        Ok(())
    }

    #[test]
    fn test_input_invalid_power() {
        let mut input = sample_input();
        input.power = Some(1.0);
        assert!(matches!(input.build(), Err(DppError::InvalidParameter(_))));
    }

    #[test]
    fn test_input_ragged_similarity() {
        let mut input = sample_input();
        input.similarity[1].pop();
        assert!(matches!(
            input.build(),
            Err(DppError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_input_parameters_checked_before_shapes() {
        let mut input = sample_input();
        input.theta.clear();
        input.similarity[1].pop();
        input.receivers.pop();
        match input.build() {
            Err(DppError::InvalidParameter(msg)) => {
                assert_eq!(msg, "theta needs at least one element")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_input_build_matches_builder() -> Result<()> {
        let input = sample_input();
        let direct = crate::api::PairKernelBuilder::new(input.theta.clone())
            .with_feature_count(input.feature_count)
            .build(&input.points()?, &input.similarity_matrix()?)?;
        let from_document = input.build()?;
        assert_eq!(from_document.mode(), direct.mode());
        assert_eq!(from_document.kernel(), direct.kernel());
        Ok(())
    }

    #[test]
    fn test_kernel_serialization() -> Result<()> {
        let input = sample_input();
        let result = input.build()?;
        let serializable = SerializableKernel::from_pair_kernel(&result, &input.theta, "|v|^2");

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        serializable.save_to_file(temp_file.path())?;

        let loaded = SerializableKernel::load_from_file(temp_file.path())?;
        assert_eq!(loaded.mode, FeatureMode::NearestNeighbor);
        assert_eq!(loaded.metadata.n_pairs, 3);
        assert_eq!(loaded.metadata.feature_count, 2);
        for (a, b) in loaded.quality.iter().zip(result.quality()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
        let kernel = loaded.kernel_matrix()?;
        assert_eq!(kernel.dim(), (3, 3));
        for (a, b) in kernel.iter().zip(result.kernel().iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_non_finite_kernel_rejected() -> Result<()> {
        let mut input = sample_input();
        // Transmitter 0 on top of its receiver
        input.receivers[0] = [0.0, 0.0];
        let result = input.build()?;
        let serializable = SerializableKernel::from_pair_kernel(&result, &input.theta, "|v|^2");

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        assert!(matches!(
            serializable.save_to_file(temp_file.path()),
            Err(DppError::SerializationError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = SerializableKernel::load_from_file("/nonexistent/kernel.json");
        assert!(matches!(result, Err(DppError::IoError(_))));
    }
}
