//! Element types for tensors flowing through a compiled AOG.
//!
//! Only the byte width matters to the core: the memory planner multiplies it
//! with per-node element counts to get buffer sizes.

pub mod ext;


/// Tensor element type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::Display)]
pub enum DType {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "i8")]
    Int8,
    #[strum(serialize = "u8")]
    UInt8,
    #[strum(serialize = "i16")]
    Int16,
    #[strum(serialize = "i32")]
    Int32,
    #[strum(serialize = "i64")]
    Int64,
    #[strum(serialize = "f16")]
    Float16,
    #[strum(serialize = "bf16")]
    BFloat16,
    #[default]
    #[strum(serialize = "f32")]
    Float32,
    #[strum(serialize = "f64")]
    Float64,
}

impl DType {
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int8 => 1,
            Self::UInt8 => 1,
            Self::Int16 => 2,
            Self::Int32 => 4,
            Self::Int64 => 8,
            Self::Float16 => 2,
            Self::BFloat16 => 2,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Size in bytes of a buffer holding `elements` values of this type.
    pub const fn size_of(&self, elements: u64) -> u64 {
        elements * self.bytes() as u64
    }
}
