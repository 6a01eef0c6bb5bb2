use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec4};
use image::GrayImage;
use wgpu::*;
use wgpu::util::DeviceExt;

use crate::config::AppConfig;
use crate::controller::animation::RenderTarget;
use crate::model::{BasicMaterial, Camera, Lights, Scene, StandardMaterial};
use crate::utils::{create_plane_mesh, create_sphere_mesh, MeshBuffer, Vertex};
use crate::view::GpuContext;

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            position: camera.eye.extend(1.0).into(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightingUniform {
    pub ambient: [f32; 4],
    pub dir_color: [f32; 4],
    pub dir_direction: [f32; 4],
    pub spot_color: [f32; 4],
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub spot_cone: [f32; 4],
    pub point_color: [f32; 4],
    pub point_position: [f32; 4],
    pub point_params: [f32; 4],
}

impl LightingUniform {
    pub fn from_lights(lights: &Lights) -> Self {
        let ambient = lights.ambient.color * lights.ambient.intensity;
        let dir = &lights.directional;
        let spot = &lights.spot;
        let point = &lights.point;
        Self {
            ambient: ambient.extend(0.0).into(),
            dir_color: dir.color.extend(dir.intensity).into(),
            dir_direction: dir.direction().extend(0.0).into(),
            spot_color: spot.color.extend(spot.intensity).into(),
            spot_position: spot.position.extend(spot.distance).into(),
            spot_direction: spot.axis().extend(0.0).into(),
            spot_cone: [spot.cone_cos(), spot.penumbra_cos(), spot.decay, 0.0],
            point_color: point.color.extend(point.intensity).into(),
            point_position: point.position.extend(point.distance).into(),
            point_params: [point.decay, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3], // mat3x3 columns padded to vec4
    pub color: [f32; 4],
    pub material: [f32; 4],
}

impl ObjectUniform {
    fn new(model: Mat4, color: Vec4, material: [f32; 4]) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: [
                normal.x_axis.extend(0.0).into(),
                normal.y_axis.extend(0.0).into(),
                normal.z_axis.extend(0.0).into(),
            ],
            color: color.into(),
            material,
        }
    }

    pub fn standard(model: Mat4, material: &StandardMaterial) -> Self {
        Self::new(
            model,
            material.color.extend(1.0),
            [material.metalness, material.roughness, 0.0, 0.0],
        )
    }

    pub fn basic(model: Mat4, material: &BasicMaterial) -> Self {
        let alpha_map = if material.use_alpha_map { 1.0 } else { 0.0 };
        Self::new(
            model,
            material.color.extend(material.effective_opacity()),
            [0.0, 1.0, alpha_map, 0.0],
        )
    }
}

/// A mesh with its own object uniform
struct DrawItem {
    mesh: MeshBuffer,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

impl DrawItem {
    fn new(device: &Device, layout: &BindGroupLayout, mesh: MeshBuffer, label: &str) -> Self {
        let uniform_buffer = device.create_buffer(&BufferDescriptor {
            label: Some(&format!("{label}_object_buffer")),
            size: std::mem::size_of::<ObjectUniform>() as BufferAddress,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some(&format!("{label}_object_bg")),
            layout,
            entries: &[BindGroupEntry { binding: 0, resource: uniform_buffer.as_entire_binding() }],
        });
        Self { mesh, uniform_buffer, bind_group }
    }

    fn write(&self, queue: &Queue, uniform: &ObjectUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    fn draw(&self, rp: &mut RenderPass<'_>, group: u32) {
        rp.set_bind_group(group, &self.bind_group, &[]);
        rp.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        rp.set_index_buffer(self.mesh.index_buffer.slice(..), IndexFormat::Uint32);
        rp.draw_indexed(0..self.mesh.index_count, 0, 0..1);
    }
}

pub fn create_depth_texture(device: &Device, width: u32, height: u32) -> (Texture, TextureView) {
    let depth_texture = device.create_texture(&TextureDescriptor {
        label: Some("depth_texture"),
        size: Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

fn uniform_entry(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_alpha_map_texture(device: &Device, queue: &Queue, alpha_map: &GrayImage) -> TextureView {
    let (width, height) = alpha_map.dimensions();
    let size = Extent3d { width, height, depth_or_array_layers: 1 };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("alpha_map"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::R8Unorm,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        alpha_map.as_raw(),
        TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&TextureViewDescriptor::default())
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a ShaderModule,
    layout: &'a PipelineLayout,
    format: TextureFormat,
    blend: BlendState,
    cull_mode: Option<Face>,
    depth_write: bool,
}

fn create_pipeline(device: &Device, desc: PipelineDesc<'_>) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState { format: desc.format, blend: Some(desc.blend), write_mask: ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

/// Owns every GPU resource of the scene and draws it each frame
pub struct SceneRenderer {
    pub gpu: GpuContext,
    pub width: u32,
    pub height: u32,
    clear_color: wgpu::Color,

    depth_view: TextureView,

    standard_pipeline: RenderPipeline,
    basic_pipeline: RenderPipeline,

    camera_buffer: Buffer,
    lighting_buffer: Buffer,
    frame_bind_group: BindGroup,
    alpha_bind_group: BindGroup,

    floor: DrawItem,
    sphere: DrawItem,
    decal: DrawItem,

    // UI
    pub egui_renderer: egui_wgpu::Renderer,
    egui_primitives: Vec<egui::ClippedPrimitive>,
    egui_textures: egui::TexturesDelta,
    egui_pixels_per_point: f32,
}

impl SceneRenderer {
    pub fn new(gpu: GpuContext, scene: &Scene, config: &AppConfig, alpha_map: &GrayImage) -> Self {
        let device = gpu.device.as_ref();
        let width = gpu.config.width;
        let height = gpu.config.height;

        let camera_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("camera_buffer"),
            size: std::mem::size_of::<CameraUniform>() as BufferAddress,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lighting_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("lighting_buffer"),
            contents: bytemuck::bytes_of(&LightingUniform::from_lights(&scene.lights)),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let frame_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[
                uniform_entry(0, ShaderStages::VERTEX | ShaderStages::FRAGMENT),
                uniform_entry(1, ShaderStages::FRAGMENT),
            ],
        });
        let frame_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_bgl,
            entries: &[
                BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
                BindGroupEntry { binding: 1, resource: lighting_buffer.as_entire_binding() },
            ],
        });

        let object_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry(0, ShaderStages::VERTEX | ShaderStages::FRAGMENT)],
        });

        let alpha_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("alpha_map_bind_group_layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let alpha_view = create_alpha_map_texture(device, gpu.queue.as_ref(), alpha_map);
        let alpha_sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("alpha_map_sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..Default::default()
        });
        let alpha_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("alpha_map_bind_group"),
            layout: &alpha_bgl,
            entries: &[
                BindGroupEntry { binding: 0, resource: BindingResource::TextureView(&alpha_view) },
                BindGroupEntry { binding: 1, resource: BindingResource::Sampler(&alpha_sampler) },
            ],
        });

        let standard_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("standard_shader"),
            source: ShaderSource::Wgsl(include_str!("shaders/standard.wgsl").into()),
        });
        let basic_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("basic_shader"),
            source: ShaderSource::Wgsl(include_str!("shaders/basic.wgsl").into()),
        });

        let standard_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("standard_pipeline_layout"),
            bind_group_layouts: &[&frame_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let basic_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("basic_pipeline_layout"),
            bind_group_layouts: &[&frame_bgl, &object_bgl, &alpha_bgl],
            push_constant_ranges: &[],
        });

        let standard_pipeline = create_pipeline(device, PipelineDesc {
            label: "standard_pipeline",
            shader: &standard_shader,
            layout: &standard_layout,
            format: gpu.format,
            blend: BlendState::REPLACE,
            cull_mode: Some(Face::Back),
            depth_write: true,
        });
        // Transparent: tested against depth but never written to it
        let basic_pipeline = create_pipeline(device, PipelineDesc {
            label: "basic_pipeline",
            shader: &basic_shader,
            layout: &basic_layout,
            format: gpu.format,
            blend: BlendState::ALPHA_BLENDING,
            cull_mode: Some(Face::Back),
            depth_write: false,
        });

        let segments = &config.scene.sphere;
        let sphere_mesh = create_sphere_mesh(scene.body.radius, segments.width_segments, segments.height_segments)
            .upload(device, "Sphere");
        let floor = DrawItem::new(device, &object_bgl, create_plane_mesh().upload(device, "Floor"), "floor");
        let sphere = DrawItem::new(device, &object_bgl, sphere_mesh, "sphere");
        let decal = DrawItem::new(device, &object_bgl, create_plane_mesh().upload(device, "Decal"), "decal");

        let (_, depth_view) = create_depth_texture(device, width, height);
        let egui_renderer = egui_wgpu::Renderer::new(device, gpu.format, egui_wgpu::RendererOptions::default());

        let [r, g, b] = config.display.clear_color.0.to_array();

        Self {
            width,
            height,
            clear_color: wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: 1.0 },
            depth_view,
            standard_pipeline,
            basic_pipeline,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            alpha_bind_group,
            floor,
            sphere,
            decal,
            egui_renderer,
            egui_primitives: Vec::new(),
            egui_textures: egui::TexturesDelta::default(),
            egui_pixels_per_point: 1.0,
            gpu,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        tracing::info!("resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.gpu.resize(width, height);
        let (_, depth_view) = create_depth_texture(self.gpu.device.as_ref(), width, height);
        self.depth_view = depth_view;
    }

    /// Queue the UI to be drawn over the next frame
    pub fn set_ui(&mut self, primitives: Vec<egui::ClippedPrimitive>, textures: egui::TexturesDelta, pixels_per_point: f32) {
        self.egui_primitives = primitives;
        self.egui_textures.append(textures);
        self.egui_pixels_per_point = pixels_per_point;
    }

    fn write_uniforms(&self, scene: &Scene, camera: &Camera) {
        let queue = self.gpu.queue.as_ref();
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&CameraUniform::from_camera(camera)));
        queue.write_buffer(&self.lighting_buffer, 0, bytemuck::bytes_of(&LightingUniform::from_lights(&scene.lights)));
        self.floor.write(queue, &ObjectUniform::standard(scene.floor.model_matrix(), &scene.floor.material));
        self.sphere.write(queue, &ObjectUniform::standard(scene.body.model_matrix(), &scene.body.material));
        self.decal.write(queue, &ObjectUniform::basic(scene.decal.model_matrix(), &scene.decal.material));
    }

    pub fn draw_frame(&mut self, scene: &Scene, camera: &Camera) -> std::result::Result<(), SurfaceError> {
        let frame = self.gpu.surface.get_current_texture()?;
        self.write_uniforms(scene, camera);

        let device = self.gpu.device.as_ref();
        let queue = self.gpu.queue.as_ref();
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("encoder"),
        });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.width, self.height],
            pixels_per_point: self.egui_pixels_per_point,
        };
        let textures = std::mem::take(&mut self.egui_textures);
        for (id, image_delta) in &textures.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &self.egui_primitives, &screen_descriptor);

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_bind_group(0, &self.frame_bind_group, &[]);

            // Opaque first
            rp.set_pipeline(&self.standard_pipeline);
            self.floor.draw(&mut rp, 1);
            self.sphere.draw(&mut rp, 1);

            // Then the decal, blended over the floor
            rp.set_pipeline(&self.basic_pipeline);
            rp.set_bind_group(2, &self.alpha_bind_group, &[]);
            self.decal.draw(&mut rp, 1);
        }

        // egui overlay
        {
            let egui_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Load,
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &self.egui_primitives, &screen_descriptor);
        }

        for id in &textures.free {
            self.egui_renderer.free_texture(id);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl RenderTarget for SceneRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        match self.draw_frame(scene, camera) {
            Ok(()) => {}
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(SurfaceError::Timeout) => tracing::debug!("surface timeout, skipping frame"),
            Err(e) => tracing::error!("surface error: {e:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scene;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::size_of::<LightingUniform>(), 160);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);
    }

    #[test]
    fn test_lighting_uniform_packs_stock_lights() {
        let scene = Scene::default();
        let u = LightingUniform::from_lights(&scene.lights);
        assert_eq!(u.ambient, [0.5, 0.5, 0.5, 0.0]);
        assert_eq!(u.dir_color[3], 0.4);
        assert_eq!(u.spot_position, [2.8, 3.0, 3.0, 6.0]);
        assert_eq!(u.spot_cone[2], 2.0);
        // no penumbra: both edges of the cone coincide
        assert_eq!(u.spot_cone[0], u.spot_cone[1]);
        assert_eq!(u.point_position, [-1.0, 1.0, 0.0, 0.0]);
        let d = Vec3::from_slice(&u.dir_direction[..3]);
        assert_abs_diff_eq!(d.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_decal_uniform_keeps_negative_opacity() {
        let mut scene = Scene::default();
        scene.decal.material.opacity = -0.27;
        let u = ObjectUniform::basic(scene.decal.model_matrix(), &scene.decal.material);
        assert_eq!(u.color[3], -0.27);
        assert_eq!(u.material[2], 1.0);
    }

    #[test]
    fn test_normal_matrix_undoes_plane_scale() {
        let scene = Scene::default();
        let u = ObjectUniform::standard(scene.floor.model_matrix(), &scene.floor.material);
        let n = Mat3::from_cols(
            Vec3::from_slice(&u.normal_matrix[0][..3]),
            Vec3::from_slice(&u.normal_matrix[1][..3]),
            Vec3::from_slice(&u.normal_matrix[2][..3]),
        ) * Vec3::Z;
        let n = n.normalize();
        assert_abs_diff_eq!(n.y, 1.0, epsilon = 1e-6);
    }

    fn validate_wgsl(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{e:?}"));
        module
    }

    fn struct_size(module: &naga::Module, name: &str) -> u32 {
        module
            .types
            .iter()
            .find_map(|(_, ty)| match ty.inner {
                naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some(name) => Some(span),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no struct {name}"))
    }

    fn entry_points(module: &naga::Module) -> Vec<&str> {
        module.entry_points.iter().map(|ep| ep.name.as_str()).collect()
    }

    #[test]
    fn test_standard_shader_validates_against_uniforms() {
        let module = validate_wgsl(include_str!("shaders/standard.wgsl"));
        assert_eq!(entry_points(&module), ["vs_main", "fs_main"]);
        assert_eq!(struct_size(&module, "CameraUniform") as usize, std::mem::size_of::<CameraUniform>());
        assert_eq!(struct_size(&module, "LightingUniform") as usize, std::mem::size_of::<LightingUniform>());
        assert_eq!(struct_size(&module, "ObjectUniform") as usize, std::mem::size_of::<ObjectUniform>());
    }

    #[test]
    fn test_basic_shader_validates_against_uniforms() {
        let module = validate_wgsl(include_str!("shaders/basic.wgsl"));
        assert_eq!(entry_points(&module), ["vs_main", "fs_main"]);
        assert_eq!(struct_size(&module, "ObjectUniform") as usize, std::mem::size_of::<ObjectUniform>());
    }
}
