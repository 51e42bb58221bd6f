use std::time::Instant;

use glam::{EulerRot, Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use eye_core::{
    build_shells, color_from_hex, EyeAssembly, EyeConfig, EyeMount, EyeSide, GazeMode,
    LightingMode, ShellVertex, IRIS_PRESETS,
};

const CAMERA_POS: Vec3 = Vec3::new(0.0, 0.0, 5.0);

// Must match the EyeUniforms block in eye.wgsl.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    iris_color1: [f32; 4],
    iris_color2: [f32; 4],
    params: [f32; 4],
    params2: [f32; 4],
    camera_pos: [f32; 4],
}

/// The pair of eyes plus the shared configuration and input samples.
struct Scene {
    left: EyeAssembly,
    right: EyeAssembly,
    config: EyeConfig,
    mount_left: EyeMount,
    mount_right: EyeMount,
    pointer: Vec2,
    start: Instant,
    time: f32,
    preset: usize,
}

impl Scene {
    fn new() -> Self {
        let config = EyeConfig::default();
        let base_mount = EyeMount {
            position: Vec3::new(-1.15, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: 0.85,
        };
        Self {
            // Distinct seeds keep the saccade schedules independent.
            left: EyeAssembly::new(config, EyeSide::Left, 7),
            right: EyeAssembly::new(config, EyeSide::Right, 42),
            config,
            mount_left: base_mount.for_side(EyeSide::Left),
            mount_right: base_mount.for_side(EyeSide::Right),
            pointer: Vec2::ZERO,
            start: Instant::now(),
            time: 0.0,
            preset: 0,
        }
    }

    /// Cursor in window pixels -> pointer in [-1, 1]^2 with +y up.
    fn set_cursor(&mut self, px: f32, py: f32, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.pointer = Vec2::new(
                (2.0 * px / width - 1.0).clamp(-1.0, 1.0),
                (1.0 - 2.0 * py / height).clamp(-1.0, 1.0),
            );
        }
    }

    fn advance(&mut self) {
        self.time = self.start.elapsed().as_secs_f32();
        self.left.advance(self.time, self.pointer);
        self.right.advance(self.time, self.pointer);
    }

    fn apply_config(&mut self) {
        self.left.set_config(self.config);
        self.right.set_config(self.config);
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Digit1 => self.set_mode(GazeMode::Mouse),
            KeyCode::Digit2 => self.set_mode(GazeMode::Calm),
            KeyCode::Digit3 => self.set_mode(GazeMode::Saccades),
            KeyCode::Digit4 => self.set_mode(GazeMode::Scanning),
            KeyCode::KeyL => {
                self.config.lighting = match self.config.lighting {
                    LightingMode::Studio => LightingMode::Flat,
                    LightingMode::Flat => LightingMode::Studio,
                };
                log::info!("[mode] lighting -> {:?}", self.config.lighting);
                self.apply_config();
            }
            KeyCode::BracketLeft => {
                self.config.pupil_size = (self.config.pupil_size - 0.02).max(0.05);
                log::info!("[mode] pupil size -> {:.2}", self.config.pupil_size);
                self.apply_config();
            }
            KeyCode::BracketRight => {
                self.config.pupil_size = (self.config.pupil_size + 0.02).min(0.35);
                log::info!("[mode] pupil size -> {:.2}", self.config.pupil_size);
                self.apply_config();
            }
            KeyCode::KeyC => {
                self.preset = (self.preset + 1) % IRIS_PRESETS.len();
                self.config.iris_color1 = color_from_hex(IRIS_PRESETS[self.preset][0]);
                self.config.iris_color2 = color_from_hex(IRIS_PRESETS[self.preset][1]);
                log::info!("[mode] iris preset -> {}", self.preset);
                self.apply_config();
            }
            _ => {}
        }
    }

    fn set_mode(&mut self, mode: GazeMode) {
        self.config.gaze_mode = mode;
        log::info!("[mode] gaze -> {:?}", mode);
        self.apply_config();
    }

    fn uniforms(&self, eye: &EyeAssembly, mount: &EyeMount, view_proj: Mat4) -> Uniforms {
        let (yaw, pitch) = eye.orientation();
        let model = eye_model_matrix(mount, yaw, pitch);
        let cfg = eye.config();
        let lighting = match cfg.lighting {
            LightingMode::Studio => 0.0,
            LightingMode::Flat => 1.0,
        };
        Uniforms {
            mvp: (view_proj * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            iris_color1: [cfg.iris_color1.x, cfg.iris_color1.y, cfg.iris_color1.z, 1.0],
            iris_color2: [cfg.iris_color2.x, cfg.iris_color2.y, cfg.iris_color2.z, 1.0],
            params: [
                eye.pupil_radius(),
                self.time,
                cfg.reflection_intensity,
                cfg.ior,
            ],
            params2: [cfg.thickness, lighting, 0.0, 0.0],
            camera_pos: [CAMERA_POS.x, CAMERA_POS.y, CAMERA_POS.z, 1.0],
        }
    }
}

/// Mount transform, then the smoothed gaze. Positive pitch looks up, which
/// maps to a negative rotation about x in this right-handed scene.
fn eye_model_matrix(mount: &EyeMount, yaw: f32, pitch: f32) -> Mat4 {
    Mat4::from_translation(mount.position)
        * Mat4::from_euler(
            EulerRot::XYZ,
            mount.rotation.x,
            mount.rotation.y,
            mount.rotation.z,
        )
        * Mat4::from_rotation_y(yaw)
        * Mat4::from_rotation_x(-pitch)
        * Mat4::from_scale(Vec3::splat(mount.scale))
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    inner_pipeline: wgpu::RenderPipeline,
    cornea_pipeline: wgpu::RenderPipeline,
    inner_vb: wgpu::Buffer,
    inner_ib: wgpu::Buffer,
    inner_index_count: u32,
    cornea_vb: wgpu::Buffer,
    cornea_ib: wgpu::Buffer,
    cornea_index_count: u32,
    uniform_buffers: [wgpu::Buffer; 2],
    bind_groups: [wgpu::BindGroup; 2],
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("eye shader"),
            source: wgpu::ShaderSource::Wgsl(eye_core::EYE_WGSL.into()),
        });

        // Both shells, built once; geometry is shared by the two eyes.
        let shells = build_shells();
        log::info!(
            "[gpu] shells built: inner {} verts, cornea {} verts",
            shells.inner.positions.len(),
            shells.cornea.positions.len()
        );
        let inner_vertices = shells.inner.vertices();
        let inner_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("inner_vb"),
            contents: bytemuck::cast_slice(&inner_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let inner_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("inner_ib"),
            contents: bytemuck::cast_slice(&shells.inner.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cornea_vertices = shells.cornea.vertices();
        let cornea_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cornea_vb"),
            contents: bytemuck::cast_slice(&cornea_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cornea_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cornea_ib"),
            contents: bytemuck::cast_slice(&shells.cornea.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        // One uniform buffer per eye; both shells of an eye share it.
        let uniform_buffers = [
            Self::make_uniform_buffer(&device, "uniforms_left"),
            Self::make_uniform_buffer(&device, "uniforms_right"),
        ];
        let bind_groups = [
            Self::make_bind_group(&device, &bind_group_layout, &uniform_buffers[0], "bg_left"),
            Self::make_bind_group(&device, &bind_group_layout, &uniform_buffers[1], "bg_right"),
        ];

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShellVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }];

        let primitive = wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        };
        let depth_state = |write| {
            Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
        };

        let inner_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("inner pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shell"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            depth_stencil: depth_state(true),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_inner"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let cornea_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cornea pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shell"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            // Transparent shell: depth-tested against the inner eyeball but
            // not written, so both eyes composite correctly.
            depth_stencil: depth_state(false),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_cornea"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let depth_view = Self::create_depth_view(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            inner_pipeline,
            cornea_pipeline,
            inner_vb,
            inner_ib,
            inner_index_count: shells.inner.indices.len() as u32,
            cornea_vb,
            cornea_ib,
            cornea_index_count: shells.cornea.indices.len() as u32,
            uniform_buffers,
            bind_groups,
            depth_view,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn make_uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn make_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth24Plus,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, &self.config);
    }

    fn view_proj(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height as f32;
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 100.0);
        let view = Mat4::look_at_rh(CAMERA_POS, Vec3::ZERO, Vec3::Y);
        proj * view
    }

    fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = self.view_proj();
        let eyes = [
            (&scene.left, &scene.mount_left),
            (&scene.right, &scene.mount_right),
        ];
        for (i, (eye, mount)) in eyes.into_iter().enumerate() {
            let u = scene.uniforms(eye, mount, view_proj);
            self.queue
                .write_buffer(&self.uniform_buffers[i], 0, bytemuck::bytes_of(&u));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.03,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Opaque eyeballs first, then the transparent corneas over them.
            rpass.set_pipeline(&self.inner_pipeline);
            rpass.set_vertex_buffer(0, self.inner_vb.slice(..));
            rpass.set_index_buffer(self.inner_ib.slice(..), wgpu::IndexFormat::Uint32);
            for bg in &self.bind_groups {
                rpass.set_bind_group(0, bg, &[]);
                rpass.draw_indexed(0..self.inner_index_count, 0, 0..1);
            }
            rpass.set_pipeline(&self.cornea_pipeline);
            rpass.set_vertex_buffer(0, self.cornea_vb.slice(..));
            rpass.set_index_buffer(self.cornea_ib.slice(..), wgpu::IndexFormat::Uint32);
            for bg in &self.bind_groups {
                rpass.set_bind_group(0, bg, &[]);
                rpass.draw_indexed(0..self.cornea_index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Procedural Eye (native)")
        .build(&event_loop)
        .expect("window");

    let mut scene = Scene::new();
    let mut gpu = pollster::block_on(GpuState::new(&window)).expect("gpu");
    log::info!("[gpu] ready; keys: 1-4 gaze mode, L lighting, [ ] pupil, C iris preset");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => gpu.resize(size),
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::CursorMoved { position, .. } => {
                    scene.set_cursor(
                        position.x as f32,
                        position.y as f32,
                        gpu.width as f32,
                        gpu.height as f32,
                    );
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state == ElementState::Pressed && !event.repeat {
                        if let PhysicalKey::Code(code) = event.physical_key {
                            scene.handle_key(code);
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                scene.advance();
                match gpu.render(&scene) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}
