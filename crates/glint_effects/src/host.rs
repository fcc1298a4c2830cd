//! Host element collaborators
//!
//! Effects never create or style host nodes themselves. A host exposes the
//! element an effect attaches to through these traits; shared handles
//! (`Rc<RefCell<_>>`) let the host keep reading an element while an effect
//! owns a handle to it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::gradual_blur::BlurOverlay;

/// An element whose text content an effect can replace
pub trait TextTarget {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);
}

impl TextTarget for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl<T: TextTarget> TextTarget for Rc<RefCell<T>> {
    fn text(&self) -> String {
        self.borrow().text()
    }

    fn set_text(&mut self, text: &str) {
        self.borrow_mut().set_text(text);
    }
}

/// Identifier of a mounted overlay, issued by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// An element (or page root) blur overlays can be mounted into
pub trait OverlayHost {
    /// Make the element a containing block for absolutely positioned children
    fn make_positioned(&mut self) {}

    fn mount_overlay(&mut self, overlay: &BlurOverlay) -> OverlayId;

    fn unmount_overlay(&mut self, id: OverlayId);
}

impl<H: OverlayHost> OverlayHost for Rc<RefCell<H>> {
    fn make_positioned(&mut self) {
        self.borrow_mut().make_positioned();
    }

    fn mount_overlay(&mut self, overlay: &BlurOverlay) -> OverlayId {
        self.borrow_mut().mount_overlay(overlay)
    }

    fn unmount_overlay(&mut self, id: OverlayId) {
        self.borrow_mut().unmount_overlay(id);
    }
}

/// In-memory overlay host, useful for headless previews and tests
#[derive(Clone, Debug, Default)]
pub struct OverlayStack {
    next_id: u64,
    positioned: bool,
    mounted: Vec<(OverlayId, BlurOverlay)>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    pub fn overlays(&self) -> impl Iterator<Item = &BlurOverlay> {
        self.mounted.iter().map(|(_, overlay)| overlay)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

impl OverlayHost for OverlayStack {
    fn make_positioned(&mut self) {
        self.positioned = true;
    }

    fn mount_overlay(&mut self, overlay: &BlurOverlay) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.mounted.push((id, overlay.clone()));
        id
    }

    fn unmount_overlay(&mut self, id: OverlayId) {
        self.mounted.retain(|(mounted, _)| *mounted != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_target_replaces_content() {
        let mut target = String::from("before");
        target.set_text("after");
        assert_eq!(target.text(), "after");
    }

    #[test]
    fn shared_text_target_is_visible_to_host() {
        let node = Rc::new(RefCell::new(String::from("a")));
        let mut handle = node.clone();
        handle.set_text("b");
        assert_eq!(*node.borrow(), "b");
    }

    #[test]
    fn overlay_stack_issues_distinct_ids() {
        let mut stack = OverlayStack::new();
        let overlay = BlurOverlay::default();
        let a = stack.mount_overlay(&overlay);
        let b = stack.mount_overlay(&overlay);
        assert_ne!(a, b);

        stack.unmount_overlay(a);
        assert_eq!(stack.len(), 1);
        stack.unmount_overlay(a);
        assert_eq!(stack.len(), 1);
    }
}
