use std::path::Path;

use vello::wgpu;

use crate::{
  ResultExt,
  render::{GpuHandle, RenderConfig},
};

pub(crate) fn render(handle: &GpuHandle, config: &RenderConfig, path: &Path) {
  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               (4 * config.width * config.height) as u64,
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(4 * config.width),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let (tx, rx) = std::sync::mpsc::channel();
  buffer.slice(..).map_async(wgpu::MapMode::Read, move |result| {
    let _ = tx.send(result);
  });
  let _ = handle.device.poll(wgpu::PollType::Wait);

  if rx.recv().map(|result| result.is_ok()).unwrap_or(false) {
    let data = buffer.slice(..).get_mapped_range();

    use image::{ImageBuffer, Rgba};
    let image = ImageBuffer::<Rgba<u8>, _>::from_raw(config.width, config.height, data).unwrap();
    image.save(path).log_err();
  } else {
    log::warn!("failed to map the output buffer, not writing {}", path.display());
  }
}
