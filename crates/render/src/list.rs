use glam::Vec3;
use hearth_assets::AssetId;
use uuid::Uuid;

/// Unique identifier for a renderable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableId(pub Uuid);

impl RenderableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RenderableId {
    fn default() -> Self {
        Self::new()
    }
}

/// A drawable entity: transform plus model and texture references.
///
/// Rotation is Euler angles in degrees, matching what plugins mutate
/// per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub model: AssetId,
    pub texture: AssetId,
}

impl Renderable {
    pub fn new(position: Vec3, model: AssetId, texture: AssetId) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
            model,
            texture,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Ordered collection of renderables.
///
/// Iteration is insertion order; removal preserves the relative order of
/// the survivors so draw order stays stable.
#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<(RenderableId, Renderable)>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a renderable, returning its id.
    pub fn push(&mut self, renderable: Renderable) -> RenderableId {
        let id = RenderableId::new();
        self.items.push((id, renderable));
        id
    }

    /// Look up a renderable by id.
    pub fn get(&self, id: RenderableId) -> Option<&Renderable> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, r)| r)
    }

    /// Mutable lookup, for per-tick transform updates.
    pub fn get_mut(&mut self, id: RenderableId) -> Option<&mut Renderable> {
        self.items
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, r)| r)
    }

    /// Remove a renderable. Returns it if it was present.
    pub fn remove(&mut self, id: RenderableId) -> Option<Renderable> {
        let idx = self.items.iter().position(|(i, _)| *i == id)?;
        Some(self.items.remove(idx).1)
    }

    /// Renderables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RenderableId, &Renderable)> {
        self.items.iter().map(|(id, r)| (*id, r))
    }

    /// Mutable iteration in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RenderableId, &mut Renderable)> {
        self.items.iter_mut().map(|(id, r)| (*id, r))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
