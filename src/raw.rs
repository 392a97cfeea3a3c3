//! Byte-level access to HDF5 objects, for element types without a typed counterpart.
use std::ffi::CString;
use std::fmt;

use hdf5::types::TypeDescriptor;
use hdf5::{Container, Datatype, Group, Location};
use hdf5_sys::h5::hsize_t;
use hdf5_sys::h5a::{H5Aclose, H5Acreate2, H5Aread, H5Awrite};
use hdf5_sys::h5d::H5Dread;
use hdf5_sys::h5i::{H5Iget_type, H5I_type_t};
use hdf5_sys::h5o::H5Ocopy;
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5s::{H5Sclose, H5Screate, H5Screate_simple, H5S_class_t, H5S_ALL};
use hdf5_sys::h5t::{H5Tdetect_class, H5Tis_variable_str, H5T_class_t};

/// Copy the object `src_name` in `src` to `dst_name` in `dst`, which may be in another
/// file. Groups are copied with all their members. Attributes, datatypes, chunking,
/// filters and fill values are kept as stored.
pub fn copy_object(
    src: &Group,
    src_name: &str,
    dst: &Group,
    dst_name: &str,
) -> Result<(), anyhow::Error> {
    let s = CString::new(src_name)?;
    let d = CString::new(dst_name)?;

    let e = hdf5::sync::sync(|| unsafe {
        H5Ocopy(
            src.id(),
            s.as_ptr(),
            dst.id(),
            d.as_ptr(),
            H5P_DEFAULT,
            H5P_DEFAULT,
        )
    });

    ensure!(
        e >= 0,
        "{}/{}: failed to copy to {}/{}",
        src.name(),
        src_name,
        dst.name(),
        dst_name
    );

    Ok(())
}

/// The stored bytes of an attribute or dataset together with its file datatype.
///
/// Datatypes holding variable-length data or references point outside the value
/// itself and cannot be held this way.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArray {
    dtype: Datatype,
    descriptor: Option<TypeDescriptor>,
    shape: Vec<usize>,
    bytes: Vec<u8>,
}

impl RawArray {
    pub fn read(c: &Container) -> Result<RawArray, anyhow::Error> {
        let dtype = c.dtype()?;
        let descriptor = dtype.to_descriptor().ok();

        ensure!(
            self_contained(&dtype),
            "{}: unsupported datatype {}",
            c.name(),
            type_name(&descriptor)
        );

        let mut bytes = vec![0u8; c.size() * dtype.size()];

        let e = hdf5::sync::sync(|| unsafe {
            if H5Iget_type(c.id()) == H5I_type_t::H5I_ATTR {
                H5Aread(c.id(), dtype.id(), bytes.as_mut_ptr().cast())
            } else {
                H5Dread(
                    c.id(),
                    dtype.id(),
                    H5S_ALL,
                    H5S_ALL,
                    H5P_DEFAULT,
                    bytes.as_mut_ptr().cast(),
                )
            }
        });
        ensure!(e >= 0, "{}: failed to read values", c.name());

        Ok(RawArray {
            dtype,
            descriptor,
            shape: c.shape(),
            bytes,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn type_name(&self) -> String {
        type_name(&self.descriptor)
    }

    /// The value of a scalar fixed-length string, without padding.
    pub fn as_str(&self) -> Option<&str> {
        match self.descriptor {
            Some(TypeDescriptor::FixedAscii(_) | TypeDescriptor::FixedUnicode(_))
                if self.shape.is_empty() =>
            {
                std::str::from_utf8(&self.bytes)
                    .ok()
                    .map(|s| s.trim_end_matches(['\0', ' ']))
            }
            _ => None,
        }
    }

    /// Create the attribute `name` on `loc` with the same datatype and bytes.
    pub fn write_attr(&self, loc: &Location, name: &str) -> Result<(), anyhow::Error> {
        let cname = CString::new(name)?;
        let dims: Vec<hsize_t> = self.shape.iter().map(|&d| d as hsize_t).collect();

        let e = hdf5::sync::sync(|| unsafe {
            let space = if dims.is_empty() {
                H5Screate(H5S_class_t::H5S_SCALAR)
            } else {
                H5Screate_simple(dims.len() as _, dims.as_ptr(), std::ptr::null())
            };
            if space < 0 {
                return -1;
            }

            let attr = H5Acreate2(
                loc.id(),
                cname.as_ptr(),
                self.dtype.id(),
                space,
                H5P_DEFAULT,
                H5P_DEFAULT,
            );
            let e = if attr < 0 {
                -1
            } else {
                let e = H5Awrite(attr, self.dtype.id(), self.bytes.as_ptr().cast());
                H5Aclose(attr);
                e
            };

            H5Sclose(space);
            e
        });

        ensure!(e >= 0, "{}: failed to write attribute '{}'", loc.name(), name);

        Ok(())
    }
}

impl fmt::Display for RawArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.descriptor {
            Some(TypeDescriptor::FixedAscii(n) | TypeDescriptor::FixedUnicode(n)) if n > 0 => {
                let strings: Vec<_> = self
                    .bytes
                    .chunks(n)
                    .map(|b| {
                        String::from_utf8_lossy(b)
                            .trim_end_matches(['\0', ' '])
                            .to_string()
                    })
                    .collect();

                match strings.as_slice() {
                    [s] if self.shape.is_empty() => write!(f, "{}", s),
                    _ => write!(f, "{:?}", strings),
                }
            }
            _ => write!(
                f,
                "<{} {:?}, {} bytes>",
                self.type_name(),
                self.shape,
                self.bytes.len()
            ),
        }
    }
}

fn type_name(descriptor: &Option<TypeDescriptor>) -> String {
    descriptor
        .as_ref()
        .map_or_else(|| "opaque".to_string(), |d| d.to_string())
}

/// Whether the stored bytes of a value of this type are the whole value.
fn self_contained(dtype: &Datatype) -> bool {
    hdf5::sync::sync(|| unsafe {
        H5Tis_variable_str(dtype.id()) == 0
            && H5Tdetect_class(dtype.id(), H5T_class_t::H5T_VLEN) == 0
            && H5Tdetect_class(dtype.id(), H5T_class_t::H5T_REFERENCE) == 0
    })
}
