use std::path::PathBuf;

/// Failures that abort the icon pipeline.
#[derive(thiserror::Error, Debug)]
pub enum IconError {
    #[error("failed to load foreground asset {}", .path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot resize {from_width}x{from_height} image to {to_width}x{to_height}")]
    Resize {
        from_width: u32,
        from_height: u32,
        to_width: u32,
        to_height: u32,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IconError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<image::ImageError>) -> Self {
        IconError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
