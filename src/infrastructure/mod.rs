//! 基础设施层：只负责产物文件的读写

pub mod artifact_io;

pub use artifact_io::{read_artifact, write_artifact};
