//! Browser-style navigation history.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with a single entry.
    pub fn reset(&mut self, path: &str) {
        self.entries = vec![path.to_string()];
        self.index = 0;
    }

    /// Record a visit. Drops the forward branch; visiting the current path
    /// again is not recorded twice.
    pub fn push(&mut self, path: &str) {
        if self.current() == Some(path) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_forward() {
        let mut h = History::new();
        h.push("/a");
        h.push("/b");
        h.push("/c");
        assert_eq!(h.back(), Some("/b"));
        assert_eq!(h.back(), Some("/a"));
        assert_eq!(h.back(), None);
        assert_eq!(h.forward(), Some("/b"));
        assert!(h.can_go_forward());
    }

    #[test]
    fn test_push_truncates_forward_branch() {
        let mut h = History::new();
        h.push("/a");
        h.push("/b");
        h.push("/c");
        h.back();
        h.back();
        h.push("/d");
        assert_eq!(h.len(), 2);
        assert!(!h.can_go_forward());
        assert_eq!(h.back(), Some("/a"));
    }

    #[test]
    fn test_duplicate_push_ignored() {
        let mut h = History::new();
        h.reset("/home");
        h.push("/home");
        assert_eq!(h.len(), 1);
        assert!(!h.can_go_back());
    }
}
