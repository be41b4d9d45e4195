//! Named runtime arguments

use serde::{Deserialize, Serialize};

use crate::bytesrepr::{ByteReader, ByteWriter, BytesReprError};
use crate::cl::{CLValue, CLValueError};

/// A `(name, value)` pair; JSON form `[name, {cl_type, bytes, parsed}]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArg(String, CLValue);

impl NamedArg {
    /// Create a named argument
    pub fn new(name: impl Into<String>, value: CLValue) -> Self {
        NamedArg(name.into(), value)
    }

    /// Argument name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Argument value
    pub fn value(&self) -> &CLValue {
        &self.1
    }

    /// Split into name and value
    pub fn into_parts(self) -> (String, CLValue) {
        (self.0, self.1)
    }
}

/// Ordered list of named arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeArgs(Vec<NamedArg>);

impl RuntimeArgs {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument, replacing any earlier one with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: CLValue) {
        let name = name.into();
        match self.0.iter_mut().find(|arg| arg.0 == name) {
            Some(existing) => existing.1 = value,
            None => self.0.push(NamedArg(name, value)),
        }
    }

    /// Build a `String` argument
    pub fn insert_string(&mut self, name: impl Into<String>, value: &str) -> Result<(), CLValueError> {
        self.insert(name, CLValue::string(value)?);
        Ok(())
    }

    /// Look up an argument by name
    pub fn get(&self, name: &str) -> Option<&CLValue> {
        self.0.iter().find(|arg| arg.0 == name).map(|arg| &arg.1)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &NamedArg> {
        self.0.iter()
    }

    /// `u32 count || (string name || framed CLValue)*`
    pub fn to_bytes(&self) -> Result<Vec<u8>, BytesReprError> {
        let mut writer = ByteWriter::new();
        writer.write_len(self.0.len())?;
        for arg in &self.0 {
            writer.write_string(&arg.0)?;
            arg.1.write(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    /// Inverse of [`RuntimeArgs::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BytesReprError> {
        let mut reader = ByteReader::new(bytes);
        let count = reader.read_len("runtime args count")?;
        let mut args = Vec::with_capacity(count.min(reader.remaining_len()));
        for _ in 0..count {
            let name = reader.read_string()?;
            args.push(NamedArg(name, CLValue::read(&mut reader)?));
        }
        reader.finish()?;
        Ok(RuntimeArgs(args))
    }
}

impl From<Vec<NamedArg>> for RuntimeArgs {
    fn from(args: Vec<NamedArg>) -> Self {
        RuntimeArgs(args)
    }
}

impl IntoIterator for RuntimeArgs {
    type Item = NamedArg;
    type IntoIter = std::vec::IntoIter<NamedArg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
