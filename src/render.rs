use crate::constants::*;
use crate::core::{
    draw_order, rgb, GroupPoses, Material, Part, SceneModel, SCENE_WGSL, WATER_SIZE, WATER_WGSL,
};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod meshes;
use meshes::GpuMesh;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    moon_dir: [f32; 4],
    moon_color: [f32; 4],
    point_pos: [[f32; 4]; 2],
    point_color: [[f32; 4]; 2],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PartUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    color: [f32; 4],
    specular: [f32; 4],
}

impl PartUniforms {
    fn new(world: Mat4, material: &Material) -> Self {
        let [r, g, b] = material.color;
        let [sr, sg, sb] = material.specular;
        Self {
            model: world.to_cols_array_2d(),
            normal: world.inverse().transpose().to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            specular: [sr, sg, sb, material.shininess],
        }
    }
}

struct PartBinding {
    part: Part,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

#[inline]
fn light(hex: u32, intensity: f32) -> [f32; 4] {
    let [r, g, b] = rgb(hex);
    let k = intensity * LIGHT_EXPOSURE;
    [r * k, g * k, b * k, 1.0]
}

/// Per-frame inputs the renderer takes from the animation side.
pub struct FrameInputs<'p> {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub poses: &'p GroupPoses,
    pub time: f32,
    pub distortion_scale: f32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    scene_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    meshes: Vec<GpuMesh>,
    parts: Vec<PartBinding>,
    water_mesh: usize,
    water_binding: (wgpu::Buffer, wgpu::BindGroup),

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, model: &SceneModel) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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
        let depth_view = helpers::create_depth_view(&device, width, height);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let part_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("part_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_layout, &part_layout],
            push_constant_ranges: &[],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water_shader"),
            source: wgpu::ShaderSource::Wgsl(WATER_WGSL.into()),
        });
        let scene_pipeline = helpers::make_mesh_pipeline(
            &device,
            "scene_pipeline",
            &pipeline_layout,
            &scene_shader,
            "vs_main",
            "fs_main",
            format,
            true,
        );
        // Same shader, but translucent parts test depth without writing it.
        let translucent_pipeline = helpers::make_mesh_pipeline(
            &device,
            "translucent_pipeline",
            &pipeline_layout,
            &scene_shader,
            "vs_main",
            "fs_main",
            format,
            false,
        );
        let water_pipeline = helpers::make_mesh_pipeline(
            &device,
            "water_pipeline",
            &pipeline_layout,
            &water_shader,
            "vs_water",
            "fs_water",
            format,
            false,
        );

        let globals_buffer = create_uniform_buffer(&device, "globals", std::mem::size_of::<Globals>());
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let meshes: Vec<GpuMesh> = model
            .library
            .iter()
            .map(|(id, mesh)| GpuMesh::upload(&device, &format!("mesh_{}", id.0), mesh))
            .collect();

        let make_binding = |label: &str| {
            let buffer = create_uniform_buffer(&device, label, std::mem::size_of::<PartUniforms>());
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &part_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            (buffer, bind_group)
        };
        // Opaque parts first so translucent debris blends over them.
        let parts = draw_order(&model.parts)
            .into_iter()
            .map(|part| {
                let (buffer, bind_group) = make_binding("part_uniforms");
                PartBinding {
                    part,
                    buffer,
                    bind_group,
                }
            })
            .collect();
        let water_binding = make_binding("water_uniforms");
        let water_uniforms = PartUniforms::new(
            Mat4::from_translation(Vec3::new(0.0, WATER_LEVEL, 0.0)),
            &Material::matte(0x002244).translucent(0.9),
        );
        queue.write_buffer(&water_binding.0, 0, bytemuck::bytes_of(&water_uniforms));

        let [r, g, b] = rgb(CLEAR_COLOR);
        log::info!(
            "[gpu] ready {}x{} format={:?} meshes={} parts={}",
            width,
            height,
            format,
            meshes.len(),
            model.parts.len()
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            scene_pipeline,
            translucent_pipeline,
            water_pipeline,
            globals_buffer,
            globals_bind_group,
            meshes,
            parts,
            water_mesh: model.water.0,
            water_binding,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
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
            self.reconfigure();
        }
    }

    /// Reapply the surface configuration, e.g. after a lost surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_view(&self.device, self.width, self.height);
    }

    pub fn render(&mut self, inputs: &FrameInputs<'_>) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: inputs.view_proj.to_cols_array_2d(),
            eye: inputs.eye.extend(1.0).to_array(),
            ambient: light(AMBIENT_COLOR, AMBIENT_INTENSITY),
            moon_dir: MOON_POSITION.normalize().extend(0.0).to_array(),
            moon_color: light(MOON_COLOR, MOON_INTENSITY),
            point_pos: POINT_LIGHTS.map(|(_, p)| p.extend(POINT_RANGE).to_array()),
            point_color: POINT_LIGHTS.map(|(c, _)| light(c, POINT_INTENSITY)),
            params: [inputs.time, inputs.distortion_scale, WATER_SIZE, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        for binding in &self.parts {
            let world = inputs.poses.world(&binding.part);
            let uniforms = PartUniforms::new(world, &binding.part.material);
            self.queue
                .write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
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
                        load: wgpu::LoadOp::Clear(self.clear_color),
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
            rpass.set_pipeline(&self.scene_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            let mut blending = false;
            for binding in &self.parts {
                if !blending && binding.part.material.is_translucent() {
                    rpass.set_pipeline(&self.translucent_pipeline);
                    blending = true;
                }
                if let Some(mesh) = self.meshes.get(binding.part.mesh.0) {
                    rpass.set_bind_group(1, &binding.bind_group, &[]);
                    mesh.draw(&mut rpass);
                }
            }
            if let Some(water) = self.meshes.get(self.water_mesh) {
                rpass.set_pipeline(&self.water_pipeline);
                rpass.set_bind_group(1, &self.water_binding.1, &[]);
                water.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
