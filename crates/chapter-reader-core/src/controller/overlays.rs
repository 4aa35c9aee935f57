use super::ReaderController;
use crate::overlay::{ClickTarget, Overlay};
use crate::speech::SpeechEngine;
use crate::store::KeyValueStore;
use tracing::debug;

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    pub fn open_overlay(&mut self, overlay: Overlay) {
        debug!(?overlay, "Opened overlay");
        self.overlays.set(overlay, true);
    }

    pub fn close_overlay(&mut self, overlay: Overlay) {
        debug!(?overlay, "Closed overlay");
        self.overlays.set(overlay, false);
    }

    pub fn toggle_settings(&mut self) {
        self.overlays.toggle(Overlay::Settings);
        debug!(expanded = self.overlays.settings, "Toggled settings panel");
    }

    /// Close overlays the click landed outside of.
    pub fn handle_click(&mut self, target: ClickTarget) {
        let closed = self.overlays.dismiss_on_click(target);
        if !closed.is_empty() {
            debug!(?target, ?closed, "Dismissed overlays on outside click");
        }
    }
}
