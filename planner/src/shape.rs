use aognet_compiler::Shape;
use aognet_dtype::{DType, ext::HasDType};
use snafu::ensure;

use crate::error::*;

/// Execution context the planner sizes buffers for.
///
/// Compiled shapes carry the batch seen at compile time in their leading
/// dimension; it is replaced by `batch` here, so one compiled graph can be
/// planned for many batch sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutionShape {
    pub batch: usize,
    pub dtype: DType,
}

impl ExecutionShape {
    pub fn new(batch: usize, dtype: DType) -> Result<Self> {
        ensure!(batch > 0, InvalidExecutionShapeSnafu { reason: "batch must be positive" });
        Ok(Self { batch, dtype })
    }

    /// Execution shape for element type `T`.
    pub fn of<T: HasDType>(batch: usize) -> Result<Self> {
        Self::new(batch, T::DTYPE)
    }

    /// Take the batch from the leading dimension of an input shape.
    pub fn from_input(input: &Shape, dtype: DType) -> Result<Self> {
        let batch = input.dim(0).ok_or_else(|| InvalidExecutionShapeSnafu { reason: "input has no batch axis" }.build())?;
        Self::new(batch, dtype)
    }

    /// Bytes of one buffer of `shape` under this context.
    pub fn bytes(&self, shape: &Shape) -> u64 {
        self.dtype.size_of(shape.with_dim(0, self.batch).numel())
    }
}
