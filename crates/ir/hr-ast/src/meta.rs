//! Semantic metadata attached to variables after lowering

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Scalar element type of a variable
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Machine integer
    #[display("int")]
    Int,
    /// Double precision float
    #[display("float")]
    Float,
    /// Double precision complex
    #[display("complex")]
    Complex,
    /// Boolean
    #[display("bool")]
    Bool,
    /// Character string
    #[display("str")]
    Str,
}

/// Type and shape of a variable
///
/// Lowering never fills this in; a later analysis may attach it to symbols
/// and arguments. A variable without metadata is treated as a scalar.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct VariableMeta {
    /// Element type
    pub dtype: DataType,
    /// Number of array dimensions, zero for scalars
    pub rank: u8,
}

impl VariableMeta {
    pub fn scalar(dtype: DataType) -> Self {
        Self { dtype, rank: 0 }
    }

    pub fn array(dtype: DataType, rank: u8) -> Self {
        Self { dtype, rank }
    }

    pub fn is_scalar(&self) -> bool {
        self.rank == 0
    }
}
