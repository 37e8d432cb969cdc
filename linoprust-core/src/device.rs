use std::fmt;

/// Represents the physical location where tensor data is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageDevice {
    /// Data is stored in main system memory (RAM).
    /// This is the default device.
    #[default]
    CPU,
    /// Data is stored on a GPU.
    ///
    /// **Note:** GPU tensors are metadata-only placeholders for now. They carry a
    /// shape and a dtype so device checks can be exercised, but their data cannot
    /// be read and no kernel runs on them.
    GPU,
}

impl fmt::Display for StorageDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageDevice::CPU => write!(f, "cpu"),
            StorageDevice::GPU => write!(f, "gpu"),
        }
    }
}
