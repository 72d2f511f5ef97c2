//! wgpu surface, pipeline and per-frame draw

use std::fmt;

use glam::Vec2;

use super::vertex::{BACKGROUND, Vertex};

/// Room for the three entity quads before the buffer has to grow
const INITIAL_VERTEX_CAPACITY: usize = 18;

/// Map a point in window pixels (origin top-left, y down) to NDC.
///
/// The whole playfield is stretched over the surface, so a resized window
/// scales the picture rather than revealing more of it.
#[inline]
pub fn pixel_to_ndc(point: Vec2, world: Vec2) -> Vec2 {
    let unit = point / world;
    Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0)
}

/// Renderer setup failure
#[derive(Debug)]
pub enum RenderError {
    /// The adapter cannot present to this surface
    UnsupportedSurface,
    Device(wgpu::RequestDeviceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedSurface => f.write_str("surface is not supported by the adapter"),
            RenderError::Device(e) => write!(f, "failed to create device: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::UnsupportedSurface => None,
            RenderError::Device(e) => Some(e),
        }
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::Device(e)
    }
}

/// Prefer an sRGB format so the flat colors come out as written
fn pick_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
}

fn build_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(format.into())],
            compilation_options: Default::default(),
        }),
        // Triangle list, no culling
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// GPU objects for drawing the playfield
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    vertex_capacity: usize,
    vertex_count: u32,
    /// Playfield size in game pixels
    pub world: Vec2,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        world: Vec2,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("duel-pong-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(adapter, width.max(1), height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;
        config.format =
            pick_format(&surface.get_capabilities(adapter)).ok_or(RenderError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

        log::debug!("Surface {}x{} {:?}", config.width, config.height, config.format);

        let pipeline = build_pipeline(&device, config.format);
        let vertices = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertices,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            world,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Rewrite pixel positions to NDC and copy them into the vertex buffer
    fn upload(&mut self, vertices: &[Vertex]) {
        let ndc: Vec<Vertex> = vertices
            .iter()
            .map(|v| Vertex::at(pixel_to_ndc(v.point(), self.world), v.color))
            .collect();

        if ndc.len() > self.vertex_capacity {
            self.vertex_capacity = ndc.len().next_power_of_two();
            self.vertices = vertex_buffer(&self.device, self.vertex_capacity);
        }
        if !ndc.is_empty() {
            self.queue.write_buffer(&self.vertices, 0, bytemuck::cast_slice(&ndc));
        }
        self.vertex_count = ndc.len() as u32;
    }

    /// Draw one frame: clear to the background, then the given triangles
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.upload(vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let [r, g, b, a] = BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("playfield_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertices.slice(..));
                pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let world = Vec2::new(600.0, 800.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, world), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(world, world), Vec2::new(1.0, -1.0));
        assert_eq!(pixel_to_ndc(world / 2.0, world), Vec2::ZERO);
    }

    #[test]
    fn test_pixel_to_ndc_y_points_down() {
        let world = Vec2::new(800.0, 600.0);
        let top = pixel_to_ndc(Vec2::new(0.0, 100.0), world);
        let bottom = pixel_to_ndc(Vec2::new(0.0, 500.0), world);
        assert!(top.y > bottom.y);
    }
}
