use wgpu::util::DeviceExt;

/// Smallest allocation for a fresh buffer, in bytes.
const MIN_CAPACITY: u64 = 256;

/// A GPU buffer whose whole contents are replaced on every write.
///
/// The allocation grows (to the next power of two) when a write does not fit
/// and is otherwise reused. Only the bytes of the most recent write are
/// exposed through [`ArrayBuffer::slice`].
pub struct ArrayBuffer {
    label: String,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    capacity: u64,
    len: u64,
}

impl ArrayBuffer {
    pub fn new(device: &wgpu::Device, label: &str, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: MIN_CAPACITY,
            usage,
            mapped_at_creation: false,
        });

        Self {
            label: label.to_owned(),
            usage,
            buffer,
            capacity: MIN_CAPACITY,
            len: 0,
        }
    }

    /// Replaces the buffer contents with `data`.
    ///
    /// `data.len()` must be a multiple of [`wgpu::COPY_BUFFER_ALIGNMENT`], which
    /// holds for any slice of `f32` or `u32`.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[u8]) {
        let size = data.len() as u64;

        if size > self.capacity {
            let capacity = grown_capacity(size);
            log::debug!(
                "growing buffer '{}' from {} to {} bytes",
                self.label,
                self.capacity,
                capacity
            );
            let mut contents = Vec::with_capacity(capacity as usize);
            contents.extend_from_slice(data);
            contents.resize(capacity as usize, 0);
            self.buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&self.label),
                contents: &contents,
                usage: self.usage,
            });
            self.capacity = capacity;
        } else if size > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }

        self.len = size;
    }

    /// The bytes written by the last [`ArrayBuffer::write`], or `None` if it was empty.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        (self.len > 0).then(|| self.buffer.slice(..self.len))
    }

    /// Size of the last write in bytes.
    pub fn byte_len(&self) -> u64 {
        self.len
    }
}

fn grown_capacity(size: u64) -> u64 {
    size.max(MIN_CAPACITY).next_power_of_two()
}
