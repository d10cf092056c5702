mod sprite_list;
mod texture;

pub use sprite_list::{Sprite, SpriteHandle, SpriteList};
pub use texture::{ImageLoader, SpriteTexture, TextureLoader};
