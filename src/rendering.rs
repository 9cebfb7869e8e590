//! Rendering system: the page background plus the piano keyboard on top.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// What one frame shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PianoFrame {
    /// Page background (normalized sRGB)
    pub background: Vec3,
    pub key_count: usize,
    pub hovered: Option<usize>,
    pub locked: Option<usize>,
    /// Hero fade, 1 at the top of the page
    pub opacity: f32,
    /// Page scroll as a fraction of the viewport height
    pub scroll_shift: f32,
}

/// Uniform buffer for the piano shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PianoUniforms {
    pub viewport: [f32; 2],
    pub key_count: f32,
    pub hovered: f32,
    pub locked: f32,
    pub opacity: f32,
    pub scroll_shift: f32,
    pub _padding: f32,
}

impl PianoUniforms {
    pub fn new(frame: &PianoFrame, width: u32, height: u32) -> Self {
        let index = |key: Option<usize>| key.map_or(-1.0, |i| i as f32);
        Self {
            viewport: [width as f32, height as f32],
            key_count: frame.key_count as f32,
            hovered: index(frame.hovered),
            locked: index(frame.locked),
            opacity: frame.opacity.clamp(0.0, 1.0),
            scroll_shift: frame.scroll_shift,
            _padding: 0.0,
        }
    }
}

/// Rendering system managing the wgpu device, window surface and piano pipeline
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    piano_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Result<Self, String> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to request device: {}", e))?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Piano Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("piano.wgsl").into()),
        });

        let uniforms = PianoUniforms::new(
            &PianoFrame {
                background: Vec3::ZERO,
                key_count: 0,
                hovered: None,
                locked: None,
                opacity: 1.0,
                scroll_shift: 0.0,
            },
            config.width,
            config.height,
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Piano Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Piano Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Piano Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Piano Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Fullscreen triangle, no vertex buffers
        let piano_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Piano Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            piano_pipeline,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    /// Reconfigure the surface after the window was resized
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Render one frame: clear to the background, then draw the keys
    pub fn render(&self, frame: &PianoFrame) -> Result<(), wgpu::SurfaceError> {
        let uniforms = PianoUniforms::new(frame, self.config.width, self.config.height);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let background = frame.background;
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let color = if self.config.format.is_srgb() {
            srgb_to_linear(background)
        } else {
            background
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Background Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color.x as f64,
                            g: color.y as f64,
                            b: color.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.piano_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Clear colours on an sRGB surface are given in linear space
fn srgb_to_linear(c: Vec3) -> Vec3 {
    let channel = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(c.x), channel(c.y), channel(c.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PianoFrame {
        PianoFrame {
            background: Vec3::ZERO,
            key_count: 7,
            hovered: None,
            locked: Some(2),
            opacity: 1.0,
            scroll_shift: 0.0,
        }
    }

    #[test]
    fn test_uniforms_match_shader_layout() {
        assert_eq!(std::mem::size_of::<PianoUniforms>(), 32);
    }

    #[test]
    fn test_uniforms_mark_missing_keys() {
        let u = PianoUniforms::new(&frame(), 1280, 720);
        assert_eq!(u.viewport, [1280.0, 720.0]);
        assert_eq!(u.key_count, 7.0);
        assert_eq!(u.hovered, -1.0);
        assert_eq!(u.locked, 2.0);
    }

    #[test]
    fn test_uniforms_clamp_opacity() {
        let u = PianoUniforms::new(
            &PianoFrame {
                opacity: 1.7,
                ..frame()
            },
            10,
            10,
        );
        assert_eq!(u.opacity, 1.0);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(Vec3::ZERO), Vec3::ZERO);
        assert!((srgb_to_linear(Vec3::ONE) - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_srgb_mid_grey_is_darker_in_linear() {
        let linear = srgb_to_linear(Vec3::splat(0.5));
        assert!((linear.x - 0.2140).abs() < 1e-3);
    }
}
