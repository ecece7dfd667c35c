//! The derived comparison table

use serde::{Deserialize, Serialize};

/// Column names of the exported comparison table, in output order.
///
/// These are the legacy spreadsheet headers downstream consumers expect;
/// `Dip_Metodo`/`DipDir_Metodo` carry the method's mean errors, matching the
/// historical layout.
pub const COLUMN_NAMES: [&str; 10] = [
    "Config",
    "Plano",
    "Metodo",
    "Dip_Campo",
    "DipDir_Campo",
    "Dip_Metodo",
    "DipDir_Metodo",
    "N_Medicoes",
    "Erro_Dip",
    "Erro_DipDir",
];

/// One comparison row: a (config, plane, method) combination with at least
/// one matching field reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Configuration identifier as it appears in the field data
    #[serde(rename = "Config")]
    pub config: String,
    /// Plane identifier in {1,2,3,4}
    #[serde(rename = "Plano")]
    pub plane: i8,
    /// Detection method name
    #[serde(rename = "Metodo")]
    pub method: String,
    /// Mean field dip over the matching readings, degrees
    #[serde(rename = "Dip_Campo")]
    pub dip_field: f64,
    /// Mean field dip direction over the matching readings, degrees
    #[serde(rename = "DipDir_Campo")]
    pub dip_dir_field: f64,
    /// Mean of the method's dip errors over the (config, method) subset
    #[serde(rename = "Dip_Metodo")]
    pub dip_method: f64,
    /// Mean of the method's dip-direction errors over the subset
    #[serde(rename = "DipDir_Metodo")]
    pub dip_dir_method: f64,
    /// Number of matching field readings, always >= 1
    #[serde(rename = "N_Medicoes")]
    pub n_measurements: usize,
    /// |Dip_Campo - Dip_Metodo|
    #[serde(rename = "Erro_Dip")]
    pub dip_error: f64,
    /// |DipDir_Campo - DipDir_Metodo|
    #[serde(rename = "Erro_DipDir")]
    pub dip_dir_error: f64,
}
