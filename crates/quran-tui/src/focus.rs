//! FocusRing — keyboard focus cycling between the visible panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current().map_or(false, |c| c == id)
    }

    /// Replace the ring contents on screen switch, keeping the focused
    /// pane if it survives into the new screen.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if let Some(pos) = self.items.iter().position(|&x| x == id) {
                self.current = pos;
                return;
            }
        }
        self.current = 0;
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_forward_and_back() {
        let mut ring = FocusRing::new(vec![ComponentId::SurahList, ComponentId::VersePane]);
        assert_eq!(ring.current(), Some(ComponentId::SurahList));
        assert_eq!(ring.next(), Some(ComponentId::VersePane));
        assert_eq!(ring.next(), Some(ComponentId::SurahList));
        assert_eq!(ring.prev(), Some(ComponentId::VersePane));
    }

    #[test]
    fn set_items_keeps_surviving_focus() {
        let mut ring = FocusRing::new(vec![ComponentId::SurahList, ComponentId::VersePane]);
        ring.set(ComponentId::VersePane);
        ring.set_items(vec![ComponentId::StationList, ComponentId::VersePane]);
        assert_eq!(ring.current(), Some(ComponentId::VersePane));
        ring.set_items(vec![ComponentId::SearchPane]);
        assert_eq!(ring.current(), Some(ComponentId::SearchPane));
    }

    #[test]
    fn empty_ring_is_harmless() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.current(), None);
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
    }
}
