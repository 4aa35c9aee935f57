//! Dismissible panels: the chapter-index modal and the expandable settings panel.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    ChapterIndex,
    Settings,
}

/// Where a pointer click landed, as resolved by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around a modal's content.
    Backdrop(Overlay),
    /// Inside an overlay's own bounds.
    Inside(Overlay),
    /// Anywhere else on the page.
    Page,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overlays {
    pub chapter_index: bool,
    pub settings: bool,
}

impl Overlays {
    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::ChapterIndex => self.chapter_index,
            Overlay::Settings => self.settings,
        }
    }

    pub fn set(&mut self, overlay: Overlay, open: bool) {
        match overlay {
            Overlay::ChapterIndex => self.chapter_index = open,
            Overlay::Settings => self.settings = open,
        }
    }

    pub fn toggle(&mut self, overlay: Overlay) {
        let open = self.is_open(overlay);
        self.set(overlay, !open);
    }

    /// Close whatever the click landed outside of. Returns the overlays that closed.
    pub fn dismiss_on_click(&mut self, target: ClickTarget) -> Vec<Overlay> {
        let mut closed = Vec::new();
        if let ClickTarget::Backdrop(Overlay::ChapterIndex) = target {
            if self.chapter_index {
                self.chapter_index = false;
                closed.push(Overlay::ChapterIndex);
            }
        }
        if self.settings && target != ClickTarget::Inside(Overlay::Settings) {
            self.settings = false;
            closed.push(Overlay::Settings);
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_click_closes_modal() {
        let mut overlays = Overlays {
            chapter_index: true,
            settings: false,
        };
        let closed = overlays.dismiss_on_click(ClickTarget::Backdrop(Overlay::ChapterIndex));
        assert_eq!(closed, vec![Overlay::ChapterIndex]);
        assert!(!overlays.chapter_index);
    }

    #[test]
    fn click_inside_modal_keeps_it_open() {
        let mut overlays = Overlays {
            chapter_index: true,
            settings: false,
        };
        assert!(
            overlays
                .dismiss_on_click(ClickTarget::Inside(Overlay::ChapterIndex))
                .is_empty()
        );
        assert!(overlays.chapter_index);
    }

    #[test]
    fn outside_click_collapses_settings_panel() {
        let mut overlays = Overlays {
            chapter_index: false,
            settings: true,
        };
        overlays.dismiss_on_click(ClickTarget::Inside(Overlay::Settings));
        assert!(overlays.settings);
        overlays.dismiss_on_click(ClickTarget::Page);
        assert!(!overlays.settings);
    }

    #[test]
    fn toggle_flips_state() {
        let mut overlays = Overlays::default();
        overlays.toggle(Overlay::Settings);
        assert!(overlays.is_open(Overlay::Settings));
        overlays.toggle(Overlay::Settings);
        assert!(!overlays.is_open(Overlay::Settings));
    }
}
