//! Element-type dispatch over the values of attributes and datasets.
use std::fmt;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Container, H5Type, Location};
use ndarray::{arr0, ArrayD};

use crate::raw::RawArray;

/// The values of an attribute or a dataset, with their element type.
///
/// Scalars are zero-dimensional arrays. The element types found in demonstration
/// datasets (integers, floats, booleans and variable-length strings) are decoded.
/// Anything else without variable-length parts, such as fixed-length strings and
/// compounds, is kept as stored bytes in [`AnyArray::Raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnyArray {
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Bool(ArrayD<bool>),
    Unicode(ArrayD<VarLenUnicode>),
    Ascii(ArrayD<VarLenAscii>),
    Raw(RawArray),
}

macro_rules! dispatch {
    ($self:expr, $a:ident => $e:expr, $r:ident => $re:expr) => {
        match $self {
            AnyArray::Int8($a) => $e,
            AnyArray::Int16($a) => $e,
            AnyArray::Int32($a) => $e,
            AnyArray::Int64($a) => $e,
            AnyArray::UInt8($a) => $e,
            AnyArray::UInt16($a) => $e,
            AnyArray::UInt32($a) => $e,
            AnyArray::UInt64($a) => $e,
            AnyArray::Float32($a) => $e,
            AnyArray::Float64($a) => $e,
            AnyArray::Bool($a) => $e,
            AnyArray::Unicode($a) => $e,
            AnyArray::Ascii($a) => $e,
            AnyArray::Raw($r) => $re,
        }
    };
}

impl AnyArray {
    /// Read all values of an attribute or a dataset.
    ///
    /// Fails with `<object>: unsupported datatype <type>` for variable-length sequences,
    /// references and types holding them.
    pub fn read(c: &Container) -> Result<AnyArray, anyhow::Error> {
        use AnyArray::*;

        Ok(match c.dtype()?.to_descriptor() {
            Ok(TypeDescriptor::Integer(IntSize::U1)) => Int8(read_as(c)?),
            Ok(TypeDescriptor::Integer(IntSize::U2)) => Int16(read_as(c)?),
            Ok(TypeDescriptor::Integer(IntSize::U4)) => Int32(read_as(c)?),
            Ok(TypeDescriptor::Integer(IntSize::U8)) => Int64(read_as(c)?),
            Ok(TypeDescriptor::Unsigned(IntSize::U1)) => UInt8(read_as(c)?),
            Ok(TypeDescriptor::Unsigned(IntSize::U2)) => UInt16(read_as(c)?),
            Ok(TypeDescriptor::Unsigned(IntSize::U4)) => UInt32(read_as(c)?),
            Ok(TypeDescriptor::Unsigned(IntSize::U8)) => UInt64(read_as(c)?),
            Ok(TypeDescriptor::Float(FloatSize::U4)) => Float32(read_as(c)?),
            Ok(TypeDescriptor::Float(FloatSize::U8)) => Float64(read_as(c)?),
            Ok(TypeDescriptor::Boolean) => Bool(read_as(c)?),
            Ok(TypeDescriptor::VarLenUnicode) => Unicode(read_as(c)?),
            Ok(TypeDescriptor::VarLenAscii) => Ascii(read_as(c)?),
            _ => Raw(RawArray::read(c)?),
        })
    }

    /// A scalar variable-length UTF-8 string.
    pub fn string(s: &str) -> Result<AnyArray, anyhow::Error> {
        Ok(AnyArray::Unicode(arr0(s.parse::<VarLenUnicode>()?).into_dyn()))
    }

    /// The string value, if this is a scalar string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyArray::Unicode(a) if a.ndim() == 0 => a.first().map(|s| s.as_str()),
            AnyArray::Ascii(a) if a.ndim() == 0 => a.first().map(|s| s.as_str()),
            AnyArray::Raw(r) => r.as_str(),
            _ => None,
        }
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape(), r => r.shape())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len(), r => r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        self.shape().is_empty()
    }

    pub fn dtype_name(&self) -> String {
        use AnyArray::*;

        let name = match self {
            Int8(_) => "int8",
            Int16(_) => "int16",
            Int32(_) => "int32",
            Int64(_) => "int64",
            UInt8(_) => "uint8",
            UInt16(_) => "uint16",
            UInt32(_) => "uint32",
            UInt64(_) => "uint64",
            Float32(_) => "float32",
            Float64(_) => "float64",
            Bool(_) => "bool",
            Unicode(_) => "str",
            Ascii(_) => "ascii",
            Raw(r) => return r.type_name(),
        };

        name.to_string()
    }

    /// Create the attribute `name` on `loc`. Fails if it already exists.
    pub fn write_attr(&self, loc: &Location, name: &str) -> Result<(), anyhow::Error> {
        dispatch!(self, a => write_attr_as(loc, name, a), r => r.write_attr(loc, name))
    }
}

impl fmt::Display for AnyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => write!(f, "{}", a), r => write!(f, "{}", r))
    }
}

fn read_as<T: H5Type>(c: &Container) -> Result<ArrayD<T>, anyhow::Error> {
    if c.is_scalar() {
        Ok(arr0(c.read_scalar::<T>()?).into_dyn())
    } else {
        Ok(c.read_dyn::<T>()?)
    }
}

fn write_attr_as<T: H5Type>(
    loc: &Location,
    name: &str,
    a: &ArrayD<T>,
) -> Result<(), anyhow::Error> {
    if a.ndim() == 0 {
        let v = a
            .first()
            .ok_or_else(|| anyhow!("{}: scalar without a value", name))?;
        loc.new_attr::<T>().create(name)?.write_scalar(v)?;
    } else {
        loc.new_attr_builder().with_data(a.view()).create(name)?;
    }

    Ok(())
}
