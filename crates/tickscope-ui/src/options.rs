//! Typed option records attached to a builder.

use std::any::{Any, TypeId};

use tickscope_core::alloc::HashMap;

/// Options for the window a panel is realized into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub draggable: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Debug".to_string(),
            draggable: true,
        }
    }
}

/// At most one record per concrete type.
#[derive(Default)]
pub(crate) struct OptionSet {
    records: HashMap<TypeId, Box<dyn Any>>,
}

impl OptionSet {
    /// Fetch the record of type `K`, inserting its default first if missing.
    pub fn get_or_default<K: Default + 'static>(&mut self) -> &mut K {
        let record = self
            .records
            .entry(TypeId::of::<K>())
            .or_insert_with(|| Box::new(K::default()));
        match record.downcast_mut::<K>() {
            Some(record) => record,
            None => unreachable!("option records are keyed by their own type id"),
        }
    }

    pub fn get<K: 'static>(&self) -> Option<&K> {
        self.records
            .get(&TypeId::of::<K>())
            .and_then(|record| record.downcast_ref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Debug for OptionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSet")
            .field("records", &self.records.len())
            .finish()
    }
}
