//! Configuration for the conversion driver and partitioner

use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Numeric type the matrix values are read into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f32" | "float" => Ok(ValueType::F32),
            "f64" | "double" => Ok(ValueType::F64),
            other => Err(format!("unknown value type '{}'", other)),
        }
    }
}

/// Settings threaded through the binaries
///
/// There is no global debug switch; verbosity lives here and is handed to
/// the logger when a binary starts.
#[derive(Debug, Clone)]
pub struct StripesConfig {
    /// Number of stripes to split a CSR matrix into
    pub n_partitions: usize,

    /// Value type used when reading a matrix
    pub value_type: ValueType,

    /// Log verbosity
    pub log_level: LevelFilter,
}

impl Default for StripesConfig {
    fn default() -> Self {
        Self {
            n_partitions: num_cpus::get(), // One stripe per available core
            value_type: ValueType::F64,
            log_level: LevelFilter::Warn,
        }
    }
}

impl StripesConfig {
    /// Raises the log level to `Debug`
    pub fn verbose(mut self) -> Self {
        self.log_level = LevelFilter::Debug;
        self
    }
}
