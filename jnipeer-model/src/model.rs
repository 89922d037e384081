//! Class registry.
//!
//! The registry owns every [`ManagedClass`] of a run. Parent links are stored
//! as qualified names and resolved here, so classes never own their ancestors.

use crate::class::ManagedClass;
use crate::error::{ModelError, ParseError};
use crate::types::{CLASS_ROOT, OBJECT_ROOT, STRING_CLASS, THROWABLE_ROOT};
use std::collections::HashMap;

/// Runtime classes seeded by [`ClassModel::with_runtime_classes`], as
/// `(class, parent)` pairs.
const RUNTIME_CLASSES: [(&str, Option<&str>); 7] = [
    (OBJECT_ROOT, None),
    (STRING_CLASS, Some(OBJECT_ROOT)),
    (CLASS_ROOT, Some(OBJECT_ROOT)),
    (THROWABLE_ROOT, Some(OBJECT_ROOT)),
    ("java.lang.Exception", Some(THROWABLE_ROOT)),
    ("java.lang.Error", Some(THROWABLE_ROOT)),
    ("java.lang.RuntimeException", Some("java.lang.Exception")),
];

/// Read-only collection of managed classes, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    classes: Vec<ManagedClass>,
    index: HashMap<String, usize>,
}

impl ClassModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model seeded with the runtime's root classes.
    #[must_use]
    pub fn with_runtime_classes() -> Self {
        let mut model = Self::new();
        for (name, parent) in RUNTIME_CLASSES {
            let mut class = ManagedClass::new(name);
            class.parent = parent.map(str::to_string);
            model.classes.push(class);
            model.index.insert(name.to_string(), model.classes.len() - 1);
        }
        model
    }

    /// Adds a class to the model.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if a class with the same
    /// qualified name was already added.
    pub fn add_class(&mut self, class: ManagedClass) -> Result<(), ParseError> {
        if self.index.contains_key(&class.qualified_name) {
            return Err(ParseError::duplicate("class", class.qualified_name));
        }
        self.index
            .insert(class.qualified_name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Looks up a class by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&ManagedClass> {
        self.index.get(qualified_name).map(|&idx| &self.classes[idx])
    }

    /// Returns all classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[ManagedClass] {
        &self.classes
    }

    /// Returns the tagged classes in insertion order.
    pub fn tagged_classes(&self) -> impl Iterator<Item = &ManagedClass> {
        self.classes.iter().filter(|c| c.is_tagged)
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the model has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolves the parent of a class.
    ///
    /// # Errors
    /// Returns `ModelError::UnknownClass` if the parent is not in the model.
    pub fn parent_of(&self, class: &ManagedClass) -> Result<Option<&ManagedClass>, ModelError> {
        match &class.parent {
            None => Ok(None),
            Some(name) => self
                .get(name)
                .map(Some)
                .ok_or_else(|| ModelError::UnknownClass { name: name.clone() }),
        }
    }

    /// Returns the chain from `class` itself up to its root, most derived first.
    ///
    /// # Errors
    /// Returns `ModelError::UnknownClass` for an unresolved parent and
    /// `ModelError::CircularInheritance` if the chain loops.
    pub fn ancestry<'a>(
        &'a self,
        class: &'a ManagedClass,
    ) -> Result<Vec<&'a ManagedClass>, ModelError> {
        let mut chain = vec![class];
        let mut current = class;
        while let Some(parent) = self.parent_of(current)? {
            if chain
                .iter()
                .any(|seen| seen.qualified_name == parent.qualified_name)
            {
                let mut path: Vec<&str> = chain.iter().map(|c| c.qualified_name.as_str()).collect();
                path.push(&parent.qualified_name);
                return Err(ModelError::CircularInheritance {
                    path: path.join(" -> "),
                });
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Returns true if `qualified_name` is `ancestor` or inherits from it.
    ///
    /// Classes absent from the model are only related to themselves.
    ///
    /// # Errors
    /// Propagates ancestry resolution errors for classes in the model.
    pub fn is_subclass_of(&self, qualified_name: &str, ancestor: &str) -> Result<bool, ModelError> {
        if qualified_name == ancestor {
            return Ok(true);
        }
        let Some(class) = self.get(qualified_name) else {
            return Ok(false);
        };
        Ok(self
            .ancestry(class)?
            .iter()
            .any(|c| c.qualified_name == ancestor))
    }
}
