use crate::constants::{
    GRID_SIZE, HIGHLIGHT_ALPHA, HIGHLIGHT_DEPTH_OFFSET, HIGHLIGHT_RGB, HIGHLIGHT_SCALE,
    SELECTED_EMISSIVE,
};
use crate::core::{Camera, ItemStore, MediaKind};
use crate::library::{MediaHandle, MediaLibrary};
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use web_sys as web;

mod helpers;
mod planes;

use planes::{
    create_binding, create_plane_resources, PlaneBinding, PlaneResources, PlaneUniforms,
    MODE_GRID, MODE_SOLID, MODE_TEXTURED,
};

pub use crate::camera::screen_to_world_ray;

/// One item to draw this frame, already eased by the smoother.
pub struct PlaneDraw {
    pub id: String,
    pub model: Mat4,
    pub kind: MediaKind,
    pub selected: bool,
}

// GPU copy of an item's media; rebuilt when size or revision changes
struct ItemTexture {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
    revision: u32,
    binding: PlaneBinding,
    highlight: PlaneBinding,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    planes: PlaneResources,
    grid: PlaneBinding,
    textures: FnvHashMap<String, ItemTexture>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        // The camera feed sits behind the canvas, so the surface must blend
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes[0]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let planes = create_plane_resources(&device, &queue, format);
        let grid = create_binding(&device, &planes, "grid_uniforms", &planes.white_view);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            planes,
            grid,
            textures: FnvHashMap::default(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Bring the texture cache in line with the store: drop textures of
    /// removed items, upload newly decoded images, copy current video frames.
    pub fn sync_textures(&mut self, store: &ItemStore, library: &MediaLibrary) {
        self.textures.retain(|id, _| store.get(id).is_some());
        for item in store.items() {
            match library.get(&item.id) {
                Some(MediaHandle::Image {
                    pixels: Some(pixels),
                    revision,
                }) => {
                    let fresh = self
                        .textures
                        .get(&item.id)
                        .map_or(true, |t| t.revision != *revision);
                    if fresh {
                        let (w, h) = pixels.dimensions();
                        let entry = self.create_item_texture(&item.id, w, h, *revision);
                        helpers::write_rgba(&self.queue, &entry.texture, w, h, pixels.as_raw());
                        self.textures.insert(item.id.clone(), entry);
                    }
                }
                Some(MediaHandle::Video(video)) => {
                    // HAVE_CURRENT_DATA
                    if video.ready_state() < 2 {
                        continue;
                    }
                    let (w, h) = (video.video_width(), video.video_height());
                    if w == 0 || h == 0 {
                        continue;
                    }
                    let resized = self
                        .textures
                        .get(&item.id)
                        .map_or(true, |t| t.width != w || t.height != h);
                    if resized {
                        let entry = self.create_item_texture(&item.id, w, h, 0);
                        self.textures.insert(item.id.clone(), entry);
                    }
                    if let Some(entry) = self.textures.get(&item.id) {
                        helpers::copy_video_frame(&self.queue, &entry.texture, video, w, h);
                    }
                }
                _ => {}
            }
        }
    }

    fn create_item_texture(&self, id: &str, width: u32, height: u32, revision: u32) -> ItemTexture {
        let (texture, view) = helpers::create_color_texture_device(
            &self.device,
            id,
            width,
            height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let binding = create_binding(&self.device, &self.planes, id, &view);
        let highlight = create_binding(&self.device, &self.planes, id, &self.planes.white_view);
        ItemTexture {
            texture,
            width,
            height,
            revision,
            binding,
            highlight,
        }
    }

    fn write_uniforms(&self, binding: &PlaneBinding, mvp: Mat4, tint: [f32; 4], params: [f32; 4]) {
        let u = PlaneUniforms {
            mvp: mvp.to_cols_array_2d(),
            tint,
            params,
        };
        self.queue
            .write_buffer(&binding.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn render(&mut self, camera: &Camera, draws: &[PlaneDraw]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let view_proj = camera.view_projection();

        let grid_model = Mat4::from_scale_rotation_translation(
            Vec3::splat(GRID_SIZE),
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::ZERO,
        );
        self.write_uniforms(
            &self.grid,
            view_proj * grid_model,
            [1.0; 4],
            [MODE_GRID, 0.0, 0.0, 0.0],
        );

        // back to front, planes are alpha blended without a depth buffer
        let mut order: Vec<&PlaneDraw> = draws
            .iter()
            .filter(|d| self.textures.contains_key(&d.id))
            .collect();
        order.sort_by(|a, b| {
            let da = a.model.w_axis.truncate().distance_squared(camera.eye);
            let db = b.model.w_axis.truncate().distance_squared(camera.eye);
            db.total_cmp(&da)
        });

        let highlight_tint = [
            HIGHLIGHT_RGB[0],
            HIGHLIGHT_RGB[1],
            HIGHLIGHT_RGB[2],
            HIGHLIGHT_ALPHA,
        ];
        for d in &order {
            let Some(tex) = self.textures.get(&d.id) else {
                continue;
            };
            let emissive = if d.selected && d.kind == MediaKind::Image {
                SELECTED_EMISSIVE
            } else {
                0.0
            };
            self.write_uniforms(
                &tex.binding,
                view_proj * d.model,
                [HIGHLIGHT_RGB[0], HIGHLIGHT_RGB[1], HIGHLIGHT_RGB[2], 1.0],
                [MODE_TEXTURED, emissive, 0.0, 0.0],
            );
            if d.selected {
                let border = d.model
                    * Mat4::from_scale_rotation_translation(
                        Vec3::new(HIGHLIGHT_SCALE, HIGHLIGHT_SCALE, 1.0),
                        Quat::IDENTITY,
                        Vec3::new(0.0, 0.0, HIGHLIGHT_DEPTH_OFFSET),
                    );
                self.write_uniforms(
                    &tex.highlight,
                    view_proj * border,
                    highlight_tint,
                    [MODE_SOLID, 0.0, 0.0, 0.0],
                );
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.planes.pipeline);
            rpass.set_bind_group(0, &self.grid.bind_group, &[]);
            rpass.draw(0..6, 0..1);
            for d in &order {
                let Some(tex) = self.textures.get(&d.id) else {
                    continue;
                };
                if d.selected {
                    rpass.set_bind_group(0, &tex.highlight.bind_group, &[]);
                    rpass.draw(0..6, 0..1);
                }
                rpass.set_bind_group(0, &tex.binding.bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
