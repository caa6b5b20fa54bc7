//! Renderers for the waiting page regions
//!
//! A [`StatusView`] stands in for the three page regions (preparing, done,
//! error) and the progress text. The worker only toggles visibility and
//! sets progress; renderers decide what that looks like.

use chrono::Utc;
use std::collections::HashSet;
use std::io::Write;

use super::types::{ProgressChanged, Region, RegionChanged};

pub trait StatusView {
    fn set_visible(&mut self, region: Region, visible: bool);
    fn set_progress(&mut self, text: &str);
}

impl<V: StatusView + ?Sized> StatusView for &mut V {
    fn set_visible(&mut self, region: Region, visible: bool) {
        (**self).set_visible(region, visible)
    }

    fn set_progress(&mut self, text: &str) {
        (**self).set_progress(text)
    }
}

impl<V: StatusView + ?Sized> StatusView for Box<V> {
    fn set_visible(&mut self, region: Region, visible: bool) {
        (**self).set_visible(region, visible)
    }

    fn set_progress(&mut self, text: &str) {
        (**self).set_progress(text)
    }
}

/// Visibility bookkeeping shared by the renderers.
/// Returns true only when a call actually changes something.
#[derive(Debug, Default)]
struct RegionState {
    visible: HashSet<Region>,
    progress: Option<String>,
}

impl RegionState {
    fn toggle(&mut self, region: Region, visible: bool) -> bool {
        if visible {
            self.visible.insert(region)
        } else {
            self.visible.remove(&region)
        }
    }

    fn progress(&mut self, text: &str) -> bool {
        if self.progress.as_deref() == Some(text) {
            return false;
        }
        self.progress = Some(text.to_string());
        true
    }
}

/// Plain-text renderer for a terminal
pub struct TerminalView<W: Write> {
    out: W,
    state: RegionState,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: RegionState::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusView for TerminalView<W> {
    fn set_visible(&mut self, region: Region, visible: bool) {
        if !self.state.toggle(region, visible) || !visible {
            return;
        }
        let line = match region {
            Region::Preparing => "Preparing your download...",
            Region::Done => "Your download is ready.",
            Region::Error => "The download could not be prepared.",
        };
        let _ = writeln!(self.out, "{}", line);
    }

    fn set_progress(&mut self, text: &str) {
        if self.state.progress(text) {
            let _ = writeln!(self.out, "  prepared so far: {}", text);
        }
    }
}

/// Renderer writing one JSON event per line
pub struct JsonView<W: Write> {
    out: W,
    state: RegionState,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: RegionState::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: serde::Serialize>(&mut self, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(line) => {
                let _ = writeln!(self.out, "{}", line);
            }
            Err(e) => log::warn!("failed to serialize view event: {}", e),
        }
    }
}

impl<W: Write> StatusView for JsonView<W> {
    fn set_visible(&mut self, region: Region, visible: bool) {
        if !self.state.toggle(region, visible) {
            return;
        }
        self.emit(&RegionChanged {
            event: "region",
            region,
            visible,
            at: Utc::now().timestamp(),
        });
    }

    fn set_progress(&mut self, text: &str) {
        if !self.state.progress(text) {
            return;
        }
        self.emit(&ProgressChanged {
            event: "progress",
            text: text.to_string(),
            at: Utc::now().timestamp(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonView, StatusView, TerminalView};
    use crate::download::types::Region;

    #[test]
    fn terminal_view_prints_each_change_once() {
        let mut view = TerminalView::new(Vec::new());
        view.set_visible(Region::Preparing, true);
        view.set_progress("1.5 MB");
        view.set_visible(Region::Preparing, true);
        view.set_progress("1.5 MB");
        view.set_visible(Region::Preparing, false);
        view.set_visible(Region::Done, true);

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(
            out,
            "Preparing your download...\n  prepared so far: 1.5 MB\nYour download is ready.\n"
        );
    }

    #[test]
    fn terminal_view_hiding_unshown_region_is_silent() {
        let mut view = TerminalView::new(Vec::new());
        view.set_visible(Region::Preparing, false);
        assert!(view.into_inner().is_empty());
    }

    #[test]
    fn json_view_emits_one_object_per_change() {
        let mut view = JsonView::new(Vec::new());
        view.set_visible(Region::Preparing, true);
        view.set_progress("0 b");
        view.set_progress("0 b");
        view.set_visible(Region::Preparing, false);
        view.set_visible(Region::Error, true);

        let out = String::from_utf8(view.into_inner()).unwrap();
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["event"], "region");
        assert_eq!(events[0]["region"], "preparing");
        assert_eq!(events[0]["visible"], true);
        assert_eq!(events[1]["event"], "progress");
        assert_eq!(events[1]["text"], "0 b");
        assert_eq!(events[2]["visible"], false);
        assert_eq!(events[3]["region"], "error");
        assert!(events[3]["at"].is_i64());
    }
}
