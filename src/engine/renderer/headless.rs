// Renderer that records draw lists instead of presenting them

use log::{debug, info};

use super::{DrawCommand, DrawList, Renderer};

/// Keeps the last draw list and frame statistics. Used by the shell until a
/// graphics backend is plugged in, and by tests to inspect draw order.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last: DrawList,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        info!("Using headless renderer");
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last(&self) -> &DrawList {
        &self.last
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, list: &DrawList) {
        self.frames += 1;
        self.last = list.clone();

        let sprites = list.sprites().count();
        let tiles: usize = list
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Layer { tiles, .. } => tiles.len(),
                _ => 0,
            })
            .sum();
        debug!(
            "Frame {}: {} sprites, {} layer tiles",
            self.frames, sprites, tiles
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_frames() {
        let mut renderer = HeadlessRenderer::new();
        renderer.draw(&DrawList::new());
        renderer.draw(&DrawList::new());
        assert_eq!(renderer.frames(), 2);
        assert!(renderer.last().is_empty());
    }
}
