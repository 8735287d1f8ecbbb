use crate::world::World;

/// Draws a frame from the world state. Implementations must not mutate it.
pub trait Renderer {
    fn render(&mut self, world: &World);
}

impl<F: FnMut(&World)> Renderer for F {
    fn render(&mut self, world: &World) {
        self(world)
    }
}

/// Renderer for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _world: &World) {}
}
