//! In-memory editor standing in for the host.

use std::cell::RefCell;
use std::rc::Rc;

use bsl::TextEdit;
use bsl::ide::{AstService, EditorHandle, SubscriptionId};

#[derive(Debug, Default)]
pub struct EditorState {
    pub text: String,
    pub next_id: u64,
    pub active: Vec<SubscriptionId>,
}

/// Cloneable handle; clones share one buffer
#[derive(Debug, Clone, Default)]
pub struct TestEditor(pub Rc<RefCell<EditorState>>);

impl TestEditor {
    pub fn new(text: &str) -> Self {
        let editor = Self::default();
        editor.0.borrow_mut().text = text.to_string();
        editor
    }

    pub fn active_subscriptions(&self) -> Vec<SubscriptionId> {
        self.0.borrow().active.clone()
    }

    /// Apply `edit` to the buffer and notify `service`, as a host would
    pub fn edit(&self, service: &mut AstService, edit: TextEdit) {
        {
            let mut state = self.0.borrow_mut();
            let start = u32::from(edit.offset) as usize;
            let end = start + u32::from(edit.deleted_len) as usize;
            state.text.replace_range(start..end, &edit.inserted);
        }
        service.content_changed(&[edit]);
    }
}

impl EditorHandle for TestEditor {
    fn current_text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn subscribe(&self) -> SubscriptionId {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.active.push(id);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.0.borrow_mut().active.retain(|active| *active != id);
    }
}

/// A default service attached to a fresh editor holding `text`
pub fn attached_service(text: &str) -> (AstService, TestEditor) {
    let editor = TestEditor::new(text);
    let mut service = AstService::default();
    service.attach(Box::new(editor.clone()));
    (service, editor)
}

/// Byte offset just past the first occurrence of `needle`
pub fn offset_after(text: &str, needle: &str) -> bsl::TextSize {
    let start = text.find(needle).unwrap_or_else(|| panic!("{needle:?} not in source"));
    bsl::TextSize::new((start + needle.len()) as u32)
}
