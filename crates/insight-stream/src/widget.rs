//! Chat widget visibility seam.

/// Show/hide capability of a chat widget, owned by presentation.
///
/// The analytics engine never holds one; a front end injects its own
/// implementation where the chat surface lives.
pub trait WidgetControl {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;

    fn toggle(&mut self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }
}

/// Widget that only tracks its visibility.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessWidget {
    visible: bool,
}

impl WidgetControl for HeadlessWidget {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
