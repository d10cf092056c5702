use super::SpriteTexture;
use macroquad::prelude::*;

/// Stable identity of a sprite inside a [`SpriteList`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

/// A positioned texture. `left`/`top` are screen coordinates of the
/// top-left corner.
#[derive(Debug, Clone)]
pub struct Sprite<T> {
    pub texture: T,
    pub left: f32,
    pub top: f32,
    pub scale: f32,
    /// Fixed on-screen size; overrides `scale` when set.
    pub size: Option<Vec2>,
}

impl<T: SpriteTexture> Sprite<T> {
    pub fn new(texture: T) -> Self {
        Sprite {
            texture,
            left: 0.0,
            top: 0.0,
            scale: 1.0,
            size: None,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// On-screen size.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.size.unwrap_or_else(|| self.texture.size() * self.scale)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.extent().y
    }

    /// Moves the sprite vertically so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.top = bottom - self.extent().y;
    }

    pub fn rect(&self) -> Rect {
        let e = self.extent();
        Rect::new(self.left, self.top, e.x, e.y)
    }
}

/// Ordered draw list. Sprites are drawn in insertion order; removing one
/// keeps the relative order of the rest.
pub struct SpriteList<T> {
    slots: Vec<Option<Sprite<T>>>,
    order: Vec<SpriteHandle>,
}

impl<T> Default for SpriteList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpriteList<T> {
    pub fn new() -> Self {
        SpriteList {
            slots: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Appends `sprite` at the end of the draw order.
    pub fn push(&mut self, sprite: Sprite<T>) -> SpriteHandle {
        let h = SpriteHandle(self.slots.len() as u32);
        self.slots.push(Some(sprite));
        self.order.push(h);
        h
    }

    pub fn remove(&mut self, handle: SpriteHandle) -> Option<Sprite<T>> {
        let sprite = self.slots.get_mut(handle.0 as usize)?.take()?;
        self.order.retain(|h| *h != handle);
        Some(sprite)
    }

    pub fn get(&self, handle: SpriteHandle) -> Option<&Sprite<T>> {
        self.slots.get(handle.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: SpriteHandle) -> Option<&mut Sprite<T>> {
        self.slots.get_mut(handle.0 as usize)?.as_mut()
    }

    pub fn contains(&self, handle: SpriteHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Draw-order index of `handle`.
    pub fn position(&self, handle: SpriteHandle) -> Option<usize> {
        self.order.iter().position(|h| *h == handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sprites in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteHandle, &Sprite<T>)> + '_ {
        self.order
            .iter()
            .filter_map(move |&h| self.get(h).map(|s| (h, s)))
    }
}

impl SpriteList<Texture2D> {
    /// Draws every sprite in order. `FilterMode::Nearest` keeps pixel art crisp.
    pub fn draw(&self, filter: FilterMode) {
        for (_, s) in self.iter() {
            s.texture.set_filter(filter);
            draw_texture_ex(
                &s.texture,
                s.left,
                s.top,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(s.extent()),
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tex(f32, f32);

    impl SpriteTexture for Tex {
        fn size(&self) -> Vec2 {
            vec2(self.0, self.1)
        }
    }

    #[test]
    fn remove_keeps_order_of_remaining_sprites() {
        let mut list = SpriteList::new();
        let a = list.push(Sprite::new(Tex(1.0, 1.0)));
        let b = list.push(Sprite::new(Tex(2.0, 2.0)));
        let c = list.push(Sprite::new(Tex(3.0, 3.0)));

        assert!(list.remove(b).is_some());
        assert_eq!(list.len(), 2);
        let order: Vec<SpriteHandle> = list.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![a, c]);
        assert!(!list.contains(b));
        assert!(list.remove(b).is_none());
    }

    #[test]
    fn handles_are_not_reused_after_removal() {
        let mut list = SpriteList::new();
        let a = list.push(Sprite::new(Tex(1.0, 1.0)));
        list.remove(a);
        let b = list.push(Sprite::new(Tex(1.0, 1.0)));
        assert_ne!(a, b);
        assert_eq!(list.position(b), Some(0));
    }

    #[test]
    fn get_mut_swaps_texture_in_place() {
        let mut list = SpriteList::new();
        list.push(Sprite::new(Tex(1.0, 1.0)));
        let h = list.push(Sprite::new(Tex(1.0, 1.0)));
        list.push(Sprite::new(Tex(1.0, 1.0)));

        list.get_mut(h).expect("sprite").texture = Tex(9.0, 9.0);
        assert_eq!(list.position(h), Some(1));
        assert_eq!(list.get(h).map(|s| s.texture.clone()), Some(Tex(9.0, 9.0)));
    }

    #[test]
    fn extent_prefers_fixed_size_over_scale() {
        let scaled = Sprite::new(Tex(16.0, 8.0)).with_scale(3.0);
        assert_eq!(scaled.extent(), vec2(48.0, 24.0));

        let sized = Sprite::new(Tex(16.0, 8.0))
            .with_scale(3.0)
            .with_size(vec2(10.0, 10.0));
        assert_eq!(sized.extent(), vec2(10.0, 10.0));
    }

    #[test]
    fn set_bottom_anchors_on_bottom_edge() {
        let mut s = Sprite::new(Tex(4.0, 4.0)).with_scale(2.0);
        s.set_bottom(100.0);
        assert_eq!(s.top, 92.0);
        assert_eq!(s.bottom(), 100.0);
    }
}
