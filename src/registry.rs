use crate::models::UploadedFile;

/// What happened to the active selection after a removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The active document changed (or shifted) to this index
    Reselected(usize),
    /// A document after the active one was removed
    Unchanged,
    /// The registry is now empty
    Emptied,
}

/// Uploaded documents of the current batch plus the active selection.
///
/// `active` is `None` or a valid index into `files`.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    files: Vec<UploadedFile>,
    active: Option<usize>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.active = None;
    }

    pub fn extend(&mut self, files: impl IntoIterator<Item = UploadedFile>) {
        self.files.extend(files);
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UploadedFile> {
        self.files.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&UploadedFile> {
        self.active.and_then(|i| self.files.get(i))
    }

    /// Select the document at `index`. Returns false when out of bounds.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Remove the document at `index`, keeping the selection at roughly the
    /// same position. Returns `None` when out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Removal> {
        if index >= self.files.len() {
            return None;
        }
        self.files.remove(index);

        if self.files.is_empty() {
            self.active = None;
            return Some(Removal::Emptied);
        }

        match self.active {
            Some(active) if index <= active => {
                let next = active.min(self.files.len() - 1);
                self.active = Some(next);
                Some(Removal::Reselected(next))
            }
            _ => Some(Removal::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn registry_of(n: usize) -> DocumentRegistry {
        let mut registry = DocumentRegistry::new();
        registry.extend((0..n).map(|i| UploadedFile {
            name: format!("doc{}.pdf", i),
            size: 1024,
            bytes: Bytes::new(),
        }));
        registry
    }

    #[test]
    fn test_set_active_bounds() {
        let mut registry = registry_of(2);
        assert!(registry.active_index().is_none());
        assert!(!registry.set_active(2));
        assert!(registry.active_index().is_none());
        assert!(registry.set_active(1));
        assert_eq!(registry.active().unwrap().name, "doc1.pdf");
    }

    #[test]
    fn test_remove_out_of_bounds_is_noop() {
        let mut registry = registry_of(2);
        registry.set_active(0);
        assert!(registry.remove(5).is_none());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_index(), Some(0));
    }

    #[test]
    fn test_remove_before_active_keeps_position() {
        // N = 4, active = 2, remove 1 -> active min(2, 2) = 2
        let mut registry = registry_of(4);
        registry.set_active(2);
        assert_eq!(registry.remove(1), Some(Removal::Reselected(2)));
        assert_eq!(registry.active().unwrap().name, "doc3.pdf");
    }

    #[test]
    fn test_remove_active_last_clamps() {
        // N = 3, active = 2, remove 2 -> active min(2, 1) = 1
        let mut registry = registry_of(3);
        registry.set_active(2);
        assert_eq!(registry.remove(2), Some(Removal::Reselected(1)));
        assert_eq!(registry.active_index(), Some(1));
    }

    #[test]
    fn test_remove_after_active_leaves_selection() {
        let mut registry = registry_of(3);
        registry.set_active(0);
        assert_eq!(registry.remove(2), Some(Removal::Unchanged));
        assert_eq!(registry.active_index(), Some(0));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_property_holds_for_all_positions() {
        for n in 2..6 {
            for active in 0..n {
                for index in 0..=active {
                    let mut registry = registry_of(n);
                    registry.set_active(active);
                    registry.remove(index);
                    assert_eq!(registry.active_index(), Some(active.min(n - 2)));
                }
            }
        }
    }

    #[test]
    fn test_remove_last_entry_empties() {
        let mut registry = registry_of(1);
        registry.set_active(0);
        assert_eq!(registry.remove(0), Some(Removal::Emptied));
        assert!(registry.is_empty());
        assert!(registry.active_index().is_none());
        assert!(registry.active().is_none());
    }

    #[test]
    fn test_clear() {
        let mut registry = registry_of(3);
        registry.set_active(1);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.active_index().is_none());
    }
}
