use starfield_core::{
    BackgroundError, DrawParams, GraphicsDevice, ParticleField, RenderSurface, SurfaceSize,
};
use web_sys as web;

mod pipeline;
use pipeline::{create_particle_resources, ParticleResources, ParticleUniforms};

/// WebGPU adapter and device for the page canvas. Lives for the whole page;
/// sessions get their own [`GpuSurface`] from it.
pub struct GpuDevice {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuDevice {
    pub async fn acquire(
        window: web::Window,
        canvas: web::HtmlCanvasElement,
    ) -> Result<Self, BackgroundError> {
        let instance = wgpu::Instance::default();
        let probe = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| BackgroundError::ContextUnavailable(format!("create_surface: {:?}", e)))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                // background decoration; never ask for the discrete GPU
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&probe),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| BackgroundError::ContextUnavailable("no WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("starfield_device"),
                },
                None,
            )
            .await
            .map_err(|e| BackgroundError::ContextUnavailable(format!("request_device: {:?}", e)))?;
        drop(probe);
        log::info!("[gpu] adapter {:?}", adapter.get_info().name);
        Ok(Self {
            window,
            canvas,
            instance,
            adapter,
            device,
            queue,
        })
    }
}

impl GraphicsDevice for GpuDevice {
    type Surface = GpuSurface;

    fn pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn max_extent(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    fn create_surface(
        &mut self,
        size: SurfaceSize,
        field: &ParticleField,
    ) -> Result<GpuSurface, BackgroundError> {
        GpuSurface::new(self, size, field)
    }
}

pub struct GpuSurface {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particles: ParticleResources,
    encode_srgb: bool,
}

impl GpuSurface {
    fn new(
        gpu: &GpuDevice,
        size: SurfaceSize,
        field: &ParticleField,
    ) -> Result<Self, BackgroundError> {
        gpu.canvas.set_width(size.width);
        gpu.canvas.set_height(size.height);
        let surface = gpu
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(gpu.canvas.clone()))
            .map_err(|e| BackgroundError::ContextUnavailable(format!("create_surface: {:?}", e)))?;
        let caps = surface.get_capabilities(&gpu.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| BackgroundError::ContextUnavailable("surface has no formats".into()))?;
        // transparent canvas so the page shows through
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        let particles = create_particle_resources(&gpu.device, format, field);

        Ok(Self {
            canvas: gpu.canvas.clone(),
            surface,
            device: gpu.device.clone(),
            queue: gpu.queue.clone(),
            config,
            particles,
            encode_srgb: !format.is_srgb(),
        })
    }
}

impl RenderSurface for GpuSurface {
    fn resize(&mut self, size: SurfaceSize) {
        if size.width == self.config.width && size.height == self.config.height {
            return;
        }
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, params: &DrawParams) -> Result<(), BackgroundError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(BackgroundError::Draw("surface outdated; reconfigured".into()));
            }
            Err(e) => return Err(BackgroundError::Draw(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = ParticleUniforms {
            view_proj: params.view_proj.to_cols_array_2d(),
            model: params.model.to_cols_array_2d(),
            params: [
                params.point_size,
                self.config.height as f32 / self.config.width as f32,
                params.opacity,
                if self.encode_srgb { 1.0 } else { 0.0 },
            ],
        };
        self.queue.write_buffer(
            &self.particles.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
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
            if self.particles.instance_count > 0 {
                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.particles.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particles.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.particles.instance_vb.slice(..));
                rpass.draw(0..6, 0..self.particles.instance_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(&mut self) {
        self.particles.destroy();
        log::debug!("[gpu] session buffers released");
    }
}
