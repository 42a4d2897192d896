//! Reference operator factory splitting the feature axis into equal units.
//!
//! With `dim = N`, input channels are cut into N units of `in_channels / N`
//! and every node over `[lo, hi)` produces `(hi - lo) * out_channels / N`
//! output channels:
//!
//! - Terminal: slice its input channels, then a 1x1 transform.
//! - And: concatenate children along the feature axis, then a learned 1x1
//!   reduction back to the node's width.
//! - Or: combine the equally-shaped alternatives by [`CombineRule`].

use aognet_aog::NodeKind;
use bon::bon;
use snafu::ensure;

use crate::error::*;
use crate::{Binding, OperatorFactory, OperatorRequest, Shape};

/// How an Or node merges its alternatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumIter)]
pub enum CombineRule {
    /// Elementwise sum.
    #[default]
    Sum,
    /// Elementwise sum followed by ReLU.
    SumRelu,
    /// Sum scaled by one learned scalar per alternative.
    WeightedSum,
    /// Concatenate, then reduce to the node width.
    ConcatReduce,
}

/// Operator handles produced by [`ChannelSplitFactory`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitOp {
    /// Input channels `[in_lo, in_hi)` transformed to `out_width` channels.
    Transform { in_lo: usize, in_hi: usize, out_width: usize },
    Fuse { in_width: usize, out_width: usize },
    Combine { rule: CombineRule, arity: usize, width: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSplitFactory {
    pub in_channels: usize,
    pub out_channels: usize,
    pub combine: CombineRule,
}

#[bon]
impl ChannelSplitFactory {
    #[builder]
    pub fn new(in_channels: usize, out_channels: usize, #[builder(default)] combine: CombineRule) -> Self {
        Self { in_channels, out_channels, combine }
    }
}

impl ChannelSplitFactory {
    fn unit(&self, channels: usize, request: &OperatorRequest<'_>) -> Result<usize> {
        ensure!(
            request.dim > 0 && channels % request.dim == 0,
            OperatorSnafu { node: request.node, reason: format!("{channels} channels do not split into {} units", request.dim) }
        );
        Ok(channels / request.dim)
    }

    fn operand(&self, request: &OperatorRequest<'_>, i: usize) -> Result<Shape> {
        request.input_shapes.get(i).cloned().ok_or_else(|| {
            OperatorSnafu { node: request.node, reason: format!("missing operand {i}") }.build()
        })
    }

    fn width(&self, shape: &Shape, request: &OperatorRequest<'_>) -> Result<usize> {
        shape.dim(request.feature_axis).ok_or_else(|| {
            InvalidInputShapeSnafu { shape: shape.clone(), axis: request.feature_axis }.build()
        })
    }
}

impl OperatorFactory for ChannelSplitFactory {
    type Op = UnitOp;

    fn bind(&self, request: &OperatorRequest<'_>) -> Result<Binding<UnitOp>> {
        let out_width = request.range.len() * self.unit(self.out_channels, request)?;
        let first = self.operand(request, 0)?;
        let output_shape = first.with_dim(request.feature_axis, out_width);
        let out_numel = output_shape.numel();

        let (op, params, cost) = match request.kind {
            NodeKind::Terminal => {
                let in_unit = self.unit(self.in_channels, request)?;
                let available = self.width(&first, request)?;
                ensure!(
                    available == self.in_channels,
                    ShapeMismatchSnafu {
                        node: request.node,
                        range: request.range,
                        expected: first.with_dim(request.feature_axis, self.in_channels),
                        actual: first.clone(),
                    }
                );
                let (in_lo, in_hi) = (request.range.lo * in_unit, request.range.hi * in_unit);
                let in_width = in_hi - in_lo;
                let op = UnitOp::Transform { in_lo, in_hi, out_width };
                (op, (in_width * out_width + out_width) as u64, out_numel * in_width as u64)
            }
            NodeKind::And => {
                let mut in_width = 0;
                for shape in request.input_shapes {
                    in_width += self.width(shape, request)?;
                }
                let op = UnitOp::Fuse { in_width, out_width };
                (op, (in_width * out_width + out_width) as u64, out_numel * in_width as u64)
            }
            NodeKind::Or => {
                let arity = request.input_shapes.len();
                let width = self.width(&first, request)?;
                ensure!(
                    width == out_width,
                    ShapeMismatchSnafu {
                        node: request.node,
                        range: request.range,
                        expected: output_shape.clone(),
                        actual: first.clone(),
                    }
                );
                let n = arity as u64;
                let (params, cost) = match self.combine {
                    CombineRule::Sum => (0, out_numel * n),
                    CombineRule::SumRelu => (0, out_numel * (n + 1)),
                    CombineRule::WeightedSum => (n, out_numel * 2 * n),
                    CombineRule::ConcatReduce => {
                        let fused = (arity * width) as u64;
                        (fused * width as u64 + width as u64, out_numel * fused)
                    }
                };
                (UnitOp::Combine { rule: self.combine, arity, width }, params, cost)
            }
        };

        Ok(Binding { op, output_shape, params, cost })
    }
}
