//! Integration tests for batching and the software backend end to end.

use quadra_core::{systems, DisplayComponent, RenderLayer, Vertex, World};
use quadra_rendering::{
    BatchRenderer, Camera, DrawBackend, RenderResult, SoftwareBackend, Texture, TextureAtlas,
};
use quadra_shared::{PixelFormat, RenderConfig, TextureId, Vec2, STAGING_QUADS};

/// Counts draws per texture.
#[derive(Default)]
struct CountingBackend {
    batches: Vec<(TextureId, usize)>,
}

impl DrawBackend for CountingBackend {
    fn set_viewport(&mut self, _width: u32, _height: u32) -> RenderResult<()> {
        Ok(())
    }

    fn set_camera(&mut self, _camera: Camera) {}

    fn clear_screen(&mut self, _rgba: [u8; 4]) {}

    fn draw_batch(&mut self, texture: &Texture, _layer: RenderLayer, vertices: &[Vertex]) {
        assert_eq!(vertices.len() % 4, 0);
        self.batches.push((texture.id(), vertices.len() / 4));
    }
}

fn textures(ids: &[u32]) -> TextureAtlas {
    let mut atlas = TextureAtlas::new();
    for &id in ids {
        atlas.insert(Texture::solid(TextureId(id), 8, 8, [id as u8, 0, 0, 255]));
    }
    atlas
}

fn sprite(texture: u32, quads: usize) -> DisplayComponent {
    let mut display = DisplayComponent::new();
    let sub = display.add_subsprite(quads, RenderLayer::World);
    display.set_texture(sub, Some(TextureId(texture)));
    display
}

#[test]
fn test_flush_count_is_ceil_of_quads_over_capacity() {
    for quads_per_sprite in [1usize, 3, 700] {
        for sprites in [1usize, 5, 40] {
            let mut renderer = BatchRenderer::new(CountingBackend::default(), STAGING_QUADS);
            for _ in 0..sprites {
                renderer.add_sprite(&sprite(1, quads_per_sprite));
            }
            renderer.mark_sprites_dirty();

            let stats = renderer.render_layer(&textures(&[1]));

            let total = quads_per_sprite * sprites;
            assert_eq!(stats.draw_calls as usize, total.div_ceil(STAGING_QUADS), "{total} quads");
            assert_eq!(stats.quads as usize, total);
            assert!(renderer.backend().batches.iter().all(|&(_, n)| n <= STAGING_QUADS));
        }
    }
}

#[test]
fn test_alternating_textures_never_coalesce() {
    let mut renderer = BatchRenderer::new(CountingBackend::default(), STAGING_QUADS);
    for i in 0..10 {
        renderer.add_sprite(&sprite(1 + i % 2, 2));
    }

    let stats = renderer.render_layer(&textures(&[1, 2]));

    // Unsorted: every entry is its own run
    assert_eq!(stats.draw_calls, 10);
    let ids: Vec<u32> = renderer.backend().batches.iter().map(|(id, _)| id.0).collect();
    assert_eq!(ids, vec![1, 2, 1, 2, 1, 2, 1, 2, 1, 2]);

    // Sorted: one run per texture, still never mixed
    renderer.backend_mut().batches.clear();
    renderer.mark_sprites_dirty();
    let stats = renderer.render_layer(&textures(&[1, 2]));
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(renderer.backend().batches, vec![(TextureId(1), 10), (TextureId(2), 10)]);
}

#[test]
fn test_world_tick_to_pixels() {
    let config = RenderConfig {
        pixel_format: PixelFormat::Bgra,
        ..RenderConfig::default()
    };
    let backend = SoftwareBackend::from_config(32, 32, &config).unwrap();
    let mut renderer = BatchRenderer::from_config(backend, &config);
    renderer.set_camera(Camera::new(Vec2::ZERO, 8.0));

    let mut world = World::with_capacity(8, 1);
    let ship = world.spawn().unwrap();
    world.displays.add(
        ship,
        DisplayComponent::quad(Vec2::new(1.0, 1.0), Vec2::ONE, RenderLayer::World, Some(TextureId(5))),
    );
    let hidden = world.spawn().unwrap();
    world.displays.add(
        hidden,
        DisplayComponent::quad(Vec2::ZERO, Vec2::ONE, RenderLayer::Null, Some(TextureId(5))),
    );

    // 8 world px per unit, 8x8 texture: native scale
    systems::integrate_velocity(&mut world, 1.0 / 60.0);
    renderer.clear_screen([0, 0, 0, 255]);
    renderer.submit_displays(&world.displays);
    let stats = renderer.render_layer(&textures(&[5]));
    systems::flush_destroyed(&mut world);

    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.quads, 1);
    let fb = renderer.backend().framebuffer();
    assert_eq!(fb.pixel_rgba(8, 8), Some([5, 0, 0, 255]));
    assert_eq!(fb.pixel_rgba(15, 15), Some([5, 0, 0, 255]));
    assert_eq!(fb.pixel_rgba(16, 16), Some([0, 0, 0, 255]));
    assert_eq!(fb.pixel_rgba(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(renderer.backend().stats().native, 1);
}
