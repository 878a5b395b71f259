//! Method identity and lookup.
//!
//! The profile store and the comparator never own method entities; they hold
//! [`MethodId`] handles handed out by a [`MethodRegistry`]. [`MethodTable`] is
//! the in-memory registry used by the binary and the tests.

use crate::errors::{ProfileError, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Handle to a method entity owned by a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u32);

impl MethodId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lookup interface the parser and comparator consume.
pub trait MethodRegistry {
    /// Resolve a fully-qualified method signature, e.g. `LFoo;.bar:()V`.
    fn resolve(&self, signature: &str) -> Option<MethodId>;

    /// Human-readable (deobfuscated) name of a method.
    fn deobfuscated_name(&self, method: MethodId) -> Option<&str>;

    /// Signature the method was registered under, for diagnostics.
    fn signature(&self, method: MethodId) -> Option<&str>;

    /// Deterministic total order used to break sort-key ties.
    fn compare_methods(&self, a: MethodId, b: MethodId) -> Ordering {
        a.cmp(&b)
    }
}

#[derive(Debug, Clone)]
struct MethodEntry {
    signature: String,
    deobfuscated: Option<String>,
}

/// Interning method registry backed by a vector of entries.
///
/// Methods can be added after a profile has been parsed, which is how
/// late-synthesized methods become resolvable for the second pass.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    entries: Vec<MethodEntry>,
    by_signature: HashMap<String, MethodId>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, returning the existing handle for a known signature.
    ///
    /// A display name given for an already-known signature replaces the old one.
    ///
    /// # Errors
    ///
    /// [`ProfileError::TooManyMethods`] once every `u32` handle is taken.
    pub fn add(&mut self, signature: &str, deobfuscated: Option<&str>) -> Result<MethodId> {
        if let Some(&id) = self.by_signature.get(signature) {
            if let Some(name) = deobfuscated {
                self.entries[id.index()].deobfuscated = Some(name.to_string());
            }
            return Ok(id);
        }
        let id = u32::try_from(self.entries.len())
            .map(MethodId::new)
            .map_err(|_| ProfileError::TooManyMethods {
                count: self.entries.len(),
            })?;
        self.entries.push(MethodEntry {
            signature: signature.to_string(),
            deobfuscated: deobfuscated.map(str::to_string),
        });
        self.by_signature.insert(signature.to_string(), id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = MethodId> + '_ {
        (0..=u32::MAX).take(self.entries.len()).map(MethodId::new)
    }

    /// Build a table from method list text.
    ///
    /// One method per line: `<signature>[<whitespace><deobfuscated name>]`.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_method_list(contents: &str) -> Result<Self> {
        let mut table = Self::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, char::is_whitespace);
            let signature = parts.next().unwrap_or_default();
            let deobfuscated = parts.next().map(str::trim).filter(|s| !s.is_empty());
            table.add(signature, deobfuscated)?;
        }
        Ok(table)
    }

    pub fn load_method_list(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
        let table = Self::parse_method_list(&contents)?;
        tracing::debug!(
            "Loaded {} methods from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

impl MethodRegistry for MethodTable {
    fn resolve(&self, signature: &str) -> Option<MethodId> {
        self.by_signature.get(signature).copied()
    }

    fn deobfuscated_name(&self, method: MethodId) -> Option<&str> {
        let entry = self.entries.get(method.index())?;
        Some(entry.deobfuscated.as_deref().unwrap_or(&entry.signature))
    }

    fn signature(&self, method: MethodId) -> Option<&str> {
        self.entries.get(method.index()).map(|e| e.signature.as_str())
    }

    fn compare_methods(&self, a: MethodId, b: MethodId) -> Ordering {
        self.signature(a)
            .cmp(&self.signature(b))
            .then_with(|| a.cmp(&b))
    }
}
