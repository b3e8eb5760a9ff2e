//! Opaque GPU buffer payload type

/// Opaque handle to a GPU-resident texture.
///
/// The packet layer never touches the texture contents; it only threads the
/// handle through. Constructing a packet from a `GpuBuffer` consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuBuffer {
    name: u32,
    width: usize,
    height: usize,
}

impl GpuBuffer {
    /// Wrap an existing texture handle.
    pub fn new(name: u32, width: usize, height: usize) -> Self {
        Self { name, width, height }
    }

    /// Platform texture name.
    pub fn name(&self) -> u32 {
        self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}
