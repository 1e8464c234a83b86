//! Core data types for hyperspectral cubes

use crate::error::HsiError;
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest element width of any supported data type, in bytes
pub const MAX_ELEMENT_WIDTH: usize = 8;

/// Element types a cube can be stored as
///
/// Numeric codes follow the ENVI header convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// Signed 16-bit integer
    Int16 = 2,
    /// Signed 32-bit integer
    Int32 = 3,
    /// 32-bit floating point
    Float32 = 4,
    /// 64-bit floating point
    Float64 = 5,
    /// Unsigned 16-bit integer
    UInt16 = 12,
    /// Unsigned 32-bit integer
    UInt32 = 13,
    /// Platform unsigned long, always treated as 64 bits wide
    ULong = 14,
    /// Unsigned 64-bit integer
    UInt64 = 15,
}

impl DataType {
    /// Size in bytes of this data type
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DataType::Byte => 1,
            DataType::Int16 | DataType::UInt16 => 2,
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => 4,
            DataType::Float64 | DataType::UInt64 | DataType::ULong => 8,
        }
    }

    /// Header code of this data type
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Look up a data type by its header code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(DataType::Byte),
            2 => Some(DataType::Int16),
            3 => Some(DataType::Int32),
            4 => Some(DataType::Float32),
            5 => Some(DataType::Float64),
            12 => Some(DataType::UInt16),
            13 => Some(DataType::UInt32),
            14 => Some(DataType::ULong),
            15 => Some(DataType::UInt64),
            _ => None,
        }
    }

    /// Canonical name token
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Byte => "byte",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::ULong => "ulong",
        }
    }

    /// Check if this is a floating point type
    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = HsiError;

    /// Accepts either a numeric header code or a name token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Ok(code) = token.parse::<u8>() {
            return DataType::from_code(code)
                .ok_or_else(|| HsiError::UnknownDataType(token.to_string()));
        }
        match token.to_ascii_lowercase().as_str() {
            "byte" => Ok(DataType::Byte),
            "int16" => Ok(DataType::Int16),
            "int32" => Ok(DataType::Int32),
            "float" | "float32" => Ok(DataType::Float32),
            "double" | "float64" => Ok(DataType::Float64),
            "uint16" => Ok(DataType::UInt16),
            "uint32" => Ok(DataType::UInt32),
            "uint64" => Ok(DataType::UInt64),
            "ulong" => Ok(DataType::ULong),
            _ => Err(HsiError::UnknownDataType(token.to_string())),
        }
    }
}

/// Physical ordering of the samples of a cube
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterleaveFormat {
    /// Band sequential: band > row > col
    #[default]
    Bsq,
    /// Band interleaved by line: row > band > col
    Bil,
    /// Band interleaved by pixel: row > col > band
    Bip,
}

impl InterleaveFormat {
    /// Axes from outermost to innermost, matching the on-disk layout
    pub fn axis_order(&self) -> [Axis; 3] {
        match self {
            InterleaveFormat::Bsq => [Axis::Band, Axis::Row, Axis::Column],
            InterleaveFormat::Bil => [Axis::Row, Axis::Band, Axis::Column],
            InterleaveFormat::Bip => [Axis::Row, Axis::Column, Axis::Band],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InterleaveFormat::Bsq => "bsq",
            InterleaveFormat::Bil => "bil",
            InterleaveFormat::Bip => "bip",
        }
    }
}

impl fmt::Display for InterleaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterleaveFormat {
    type Err = HsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bsq" => Ok(InterleaveFormat::Bsq),
            "bil" => Ok(InterleaveFormat::Bil),
            "bip" => Ok(InterleaveFormat::Bip),
            _ => Err(HsiError::UnknownInterleave(s.trim().to_string())),
        }
    }
}

/// One of the three axes of a cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
    Band,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Row => "row",
            Axis::Column => "column",
            Axis::Band => "band",
        })
    }
}

/// A decoded element value, one variant per [`DataType`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Float32(f32),
    Float64(f64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    ULong(u64),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Byte(_) => DataType::Byte,
            Value::Int16(_) => DataType::Int16,
            Value::Int32(_) => DataType::Int32,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::UInt16(_) => DataType::UInt16,
            Value::UInt32(_) => DataType::UInt32,
            Value::UInt64(_) => DataType::UInt64,
            Value::ULong(_) => DataType::ULong,
        }
    }

    /// Lossy conversion to `f64`
    pub fn to_f64(&self) -> f64 {
        match *self {
            Value::Byte(v) => v.as_(),
            Value::Int16(v) => v.as_(),
            Value::Int32(v) => v.as_(),
            Value::Float32(v) => v.as_(),
            Value::Float64(v) => v,
            Value::UInt16(v) => v.as_(),
            Value::UInt32(v) => v.as_(),
            Value::UInt64(v) | Value::ULong(v) => v.as_(),
        }
    }
}

/// A single element as raw host-order bytes, tagged with its data type
///
/// Only the first `data_type.size_in_bytes()` bytes are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    data_type: DataType,
    bytes: [u8; MAX_ELEMENT_WIDTH],
}

impl Scalar {
    /// A zero-valued scalar of the given type
    pub fn zero(data_type: DataType) -> Self {
        Self {
            data_type,
            bytes: [0; MAX_ELEMENT_WIDTH],
        }
    }

    /// Copy the first element out of host-order `bytes`, or `None` if `bytes`
    /// is shorter than one element.
    pub fn from_bytes(data_type: DataType, bytes: &[u8]) -> Option<Self> {
        let width = data_type.size_in_bytes();
        let mut scalar = Self::zero(data_type);
        scalar.bytes[..width].copy_from_slice(bytes.get(..width)?);
        Some(scalar)
    }

    pub fn from_value(value: Value) -> Self {
        let mut scalar = Self::zero(value.data_type());
        let width = value.data_type().size_in_bytes();
        let dst = &mut scalar.bytes[..width];
        match value {
            Value::Byte(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::Int16(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::Int32(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::Float32(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::Float64(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::UInt16(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::UInt32(v) => dst.copy_from_slice(&v.to_ne_bytes()),
            Value::UInt64(v) | Value::ULong(v) => dst.copy_from_slice(&v.to_ne_bytes()),
        }
        scalar
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The meaningful bytes of this element
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.data_type.size_in_bytes()]
    }

    /// Decode the element according to its data type
    pub fn value(&self) -> Value {
        let b = &self.bytes;
        match self.data_type {
            DataType::Byte => Value::Byte(b[0]),
            DataType::Int16 => Value::Int16(i16::from_ne_bytes([b[0], b[1]])),
            DataType::Int32 => Value::Int32(i32::from_ne_bytes([b[0], b[1], b[2], b[3]])),
            DataType::Float32 => Value::Float32(f32::from_ne_bytes([b[0], b[1], b[2], b[3]])),
            DataType::Float64 => Value::Float64(f64::from_ne_bytes(*b)),
            DataType::UInt16 => Value::UInt16(u16::from_ne_bytes([b[0], b[1]])),
            DataType::UInt32 => Value::UInt32(u32::from_ne_bytes([b[0], b[1], b[2], b[3]])),
            DataType::UInt64 => Value::UInt64(u64::from_ne_bytes(*b)),
            DataType::ULong => Value::ULong(u64::from_ne_bytes(*b)),
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.value().to_f64()
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self.value() {
            Value::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self.value() {
            Value::Int16(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Scalar::from_value(value)
    }
}
