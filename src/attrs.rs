//! Attributes of a group or dataset as an ordered key-value mapping.
use anyhow::Context;
use hdf5::Location;

use crate::error::LookupError;
use crate::types::AnyArray;

/// The attributes of a group or dataset as an ordered key-value mapping.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AnyArray)>,
}

impl Attributes {
    pub fn new() -> Attributes {
        Attributes::default()
    }

    /// Read every attribute of `loc`, in the order the library lists them.
    pub fn read(loc: &Location) -> Result<Attributes, anyhow::Error> {
        let entries = loc
            .attr_names()?
            .into_iter()
            .map(|n| -> Result<_, anyhow::Error> {
                let v = AnyArray::read(&*loc.attr(&n)?)
                    .with_context(|| format!("{}: reading attribute '{}'", loc.name(), n))?;
                Ok((n, v))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Attributes { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnyArray> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: AnyArray) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AnyArray> {
        let i = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyArray)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all attributes to `loc`, overwriting those that already exist there.
    pub fn write(&self, loc: &Location) -> Result<(), anyhow::Error> {
        let existing = loc.attr_names()?;

        for (k, v) in &self.entries {
            if existing.contains(k) {
                loc.delete_attr(k)?;
            }
            v.write_attr(loc, k)?;
        }

        Ok(())
    }

    /// Copy every attribute of `src` onto `dst`.
    pub fn copy(src: &Location, dst: &Location) -> Result<Attributes, anyhow::Error> {
        let attrs = Attributes::read(src)?;
        attrs.write(dst)?;
        Ok(attrs)
    }
}

/// Set a scalar string attribute, replacing any previous value.
pub fn write_string(loc: &Location, name: &str, value: &str) -> Result<(), anyhow::Error> {
    let mut attrs = Attributes::new();
    attrs.set(name, AnyArray::string(value)?);
    attrs.write(loc)
}

/// Read a scalar string attribute.
pub fn read_string(loc: &Location, name: &str) -> Result<String, anyhow::Error> {
    if !loc.attr_names()?.iter().any(|n| n == name) {
        return Err(LookupError::AttributeNotFound {
            object: loc.name(),
            attr: name.to_string(),
        }
        .into());
    }

    let v = AnyArray::read(&*loc.attr(name)?)?;
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{}: attribute '{}' is not a string", loc.name(), name))
}
