//! # Batch Renderer Benchmark
//!
//! Sorting and streaming a full world of sprites, and software blits at
//! cached vs resampled scales.
//!
//! Run with: `cargo bench --package quadra_rendering`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadra_core::{DisplayComponent, RenderLayer, Vertex};
use quadra_rendering::{BatchRenderer, Camera, DrawBackend, RenderResult, SoftwareBackend, Texture, TextureAtlas};
use quadra_shared::{PixelFormat, TextureId, Vec2, MAX_ENTITIES, STAGING_QUADS};

/// Accepts draws without touching pixels.
struct NullBackend;

impl DrawBackend for NullBackend {
    fn set_viewport(&mut self, _width: u32, _height: u32) -> RenderResult<()> {
        Ok(())
    }

    fn set_camera(&mut self, _camera: Camera) {}

    fn clear_screen(&mut self, _rgba: [u8; 4]) {}

    fn draw_batch(&mut self, _texture: &Texture, _layer: RenderLayer, vertices: &[Vertex]) {
        black_box(vertices.len());
    }
}

fn sprites(textures: u32) -> Vec<DisplayComponent> {
    (0..MAX_ENTITIES)
        .map(|i| {
            let mut display = DisplayComponent::new();
            let sub = display.add_subsprite(16, RenderLayer::World);
            display.set_texture(sub, Some(TextureId(i as u32 % textures)));
            display
        })
        .collect()
}

fn atlas(textures: u32) -> TextureAtlas {
    let mut atlas = TextureAtlas::new();
    for id in 0..textures {
        atlas.insert(Texture::solid(TextureId(id), 16, 16, [255; 4]));
    }
    atlas
}

fn bench_sort_and_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_and_stream_128x16");

    for textures in [1u32, 8, 64] {
        let displays = sprites(textures);
        let atlas = atlas(textures);
        let mut renderer = BatchRenderer::new(NullBackend, STAGING_QUADS);
        group.bench_with_input(BenchmarkId::new("textures", textures), &textures, |b, _| {
            b.iter(|| {
                renderer.clear_sprites();
                for display in &displays {
                    renderer.add_sprite(display);
                }
                renderer.mark_sprites_dirty();
                black_box(renderer.render_layer(&atlas).draw_calls)
            });
        });
    }

    group.finish();
}

fn bench_software_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("software_blit_16px");
    let texture = Texture::solid(TextureId(0), 16, 16, [200, 100, 50, 255]);

    for size in [16.0f32, 32.0, 48.0, 64.0] {
        let mut backend = SoftwareBackend::new(640, 480, PixelFormat::Bgra, 0.01).unwrap_or_else(|e| panic!("{e}"));
        let display = DisplayComponent::quad(Vec2::new(10.0, 10.0), Vec2::new(size, size), RenderLayer::World, None);
        group.bench_with_input(BenchmarkId::new("dest_px", size as u32), &size, |b, _| {
            b.iter(|| backend.draw_batch(&texture, RenderLayer::World, black_box(display.vertices())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort_and_stream, bench_software_blit);
criterion_main!(benches);
