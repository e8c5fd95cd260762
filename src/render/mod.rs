use std::path::Path;

use kurbo::{Affine, Point, Shape, Stroke};
use parley::{
  Alignment, FontContext, FontWeight, Layout, LayoutContext, PositionedLayoutItem, StyleProperty,
};
use peniko::{Brush, BrushRef, Color, Fill};
use vello::wgpu::{self, TextureDescriptor};

use crate::Figure;

mod texture;
mod window;

impl Figure {
  /// Displays the figure in a window, blocking until it is closed.
  pub fn show(&self) { window::show(self); }

  /// Renders the figure offscreen and writes it to an image file.
  pub fn save(&self, path: impl AsRef<Path>) {
    let config = self.render_config();
    let handle = GpuHandle::new(&config, None);

    let mut render = Render::new();
    self.draw(&mut render);

    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .expect("Failed to create renderer");

    renderer
      .render_to_texture(
        &handle.device,
        &handle.queue,
        &render.scene,
        &handle.view,
        &vello::RenderParams {
          base_color:          render.background,
          width:               config.width,
          height:              config.height,
          antialiasing_method: vello::AaConfig::Msaa16,
        },
      )
      .expect("Failed to render to a texture");

    texture::render(&handle, &config, path.as_ref());
  }
}

pub(crate) struct Render {
  pub(crate) scene:      vello::Scene,
  pub(crate) background: Color,

  font:   FontContext,
  layout: LayoutContext<Brush>,
}

#[derive(Clone, Copy)]
pub(crate) struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

pub(crate) struct GpuHandle {
  pub device:  wgpu::Device,
  pub queue:   wgpu::Queue,
  pub texture: wgpu::Texture,
  pub view:    wgpu::TextureView,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

#[derive(Clone, Copy, Default, PartialEq)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             16.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Render {
  pub(crate) fn new() -> Self {
    Render {
      scene:      vello::Scene::new(),
      background: Color::WHITE,
      font:       FontContext::new(),
      layout:     LayoutContext::new(),
    }
  }

  pub(crate) fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, transform, brush, None, shape);
  }

  pub(crate) fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, transform, brush, None, shape);
  }

  pub(crate) fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub(crate) fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub(crate) fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let width = f64::from(layout.width());
    let height = f64::from(layout.height());

    let origin = Point::new(
      match text.horizontal_align {
        Align::Start => text.position.x,
        Align::Center => text.position.x - width / 2.0,
        Align::End => text.position.x - width,
      },
      match text.vertical_align {
        Align::Start => text.position.y,
        Align::Center => text.position.y - height / 2.0,
        Align::End => text.position.y - height,
      },
    );

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = origin.x as f32 + glyph_run.offset();
        let baseline = origin.y as f32 + glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(Affine::IDENTITY)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  pub(crate) fn new(config: &RenderConfig, adapter: Option<wgpu::Adapter>) -> Self {
    let adapter = match adapter {
      Some(adapter) => adapter,
      None => {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
          .expect("Failed to create adapter")
      }
    };

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))
    .expect("Failed to create device");

    let texture = device.create_texture(&TextureDescriptor {
      label:           Some("Render Texture"),
      size:            config.extent_3d(),
      mip_level_count: 1,
      sample_count:    1,
      dimension:       wgpu::TextureDimension::D2,
      format:          wgpu::TextureFormat::Rgba8Unorm,
      usage:           wgpu::TextureUsages::STORAGE_BINDING
        | wgpu::TextureUsages::TEXTURE_BINDING
        | wgpu::TextureUsages::COPY_SRC,
      view_formats:    &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    GpuHandle { device, queue, texture, view }
  }
}

impl RenderConfig {
  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}
