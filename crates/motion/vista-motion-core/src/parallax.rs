//! Scroll-linked parallax.
//!
//! Scroll events only record the latest offset and raise a pending flag; the
//! translation for every element is recomputed at most once per frame, from
//! whatever offset was current when the frame ran.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// Vertical translation for a scroll offset and speed factor.
#[inline]
pub fn parallax_translation(scroll_offset: f64, speed: f64) -> f64 {
    scroll_offset * speed
}

/// CSS transform value for a translation.
pub fn translate_y(px: f64) -> String {
    format!("translateY({px}px)")
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParallaxDriver {
    elements: Vec<(ElementId, f64)>,
    pending: bool,
    latest_offset: f64,
    recomputations: u64,
}

impl ParallaxDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ElementId, speed: f64) {
        match self.elements.iter_mut().find(|(e, _)| *e == id) {
            Some(entry) => entry.1 = speed,
            None => self.elements.push((id, speed)),
        }
    }

    pub fn remove(&mut self, id: ElementId) {
        self.elements.retain(|(e, _)| *e != id);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of frames that actually recomputed translations.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Record a scroll offset. Returns true when this event raised the
    /// pending flag, i.e. the host must request a frame; events arriving while
    /// a frame is already pending are coalesced.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if offset.is_finite() {
            self.latest_offset = offset;
        }
        if self.pending || self.elements.is_empty() {
            return false;
        }
        self.pending = true;
        true
    }

    /// Run the pending recomputation, if any, and clear the flag.
    pub fn on_frame(&mut self) -> Option<Vec<(ElementId, f64)>> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.recomputations += 1;
        Some(
            self.elements
                .iter()
                .map(|&(id, speed)| (id, parallax_translation(self.latest_offset, speed)))
                .collect(),
        )
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_is_offset_times_speed() {
        assert_eq!(parallax_translation(200.0, 0.5), 100.0);
        assert_eq!(parallax_translation(0.0, 0.5), 0.0);
        assert_eq!(translate_y(100.0), "translateY(100px)");
        assert_eq!(translate_y(-12.5), "translateY(-12.5px)");
    }

    #[test]
    fn scroll_floods_coalesce_into_one_frame() {
        let mut driver = ParallaxDriver::new();
        driver.add(ElementId(1), 0.5);
        assert!(driver.on_scroll(10.0));
        assert!(!driver.on_scroll(50.0));
        assert!(!driver.on_scroll(200.0));

        let frame = driver.on_frame().unwrap();
        assert_eq!(frame, vec![(ElementId(1), 100.0)]);
        assert_eq!(driver.recomputations(), 1);
        assert!(driver.on_frame().is_none());
        assert_eq!(driver.recomputations(), 1);

        assert!(driver.on_scroll(300.0));
    }

    #[test]
    fn no_elements_never_requests_frames() {
        let mut driver = ParallaxDriver::new();
        assert!(!driver.on_scroll(10.0));
        assert!(driver.on_frame().is_none());
    }

    #[test]
    fn re_adding_updates_speed() {
        let mut driver = ParallaxDriver::new();
        driver.add(ElementId(1), 0.5);
        driver.add(ElementId(1), 0.25);
        driver.on_scroll(400.0);
        assert_eq!(driver.on_frame().unwrap(), vec![(ElementId(1), 100.0)]);
        driver.remove(ElementId(1));
        assert!(driver.is_empty());
    }
}
