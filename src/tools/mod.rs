mod ffmpeg_command;
mod ffprobe_info;
mod media_engine;
mod path_validator;
mod video_scanner;

pub use ffmpeg_command::{FRAME_COUNT, FfmpegCommand, ScreenshotRequest};
pub use ffprobe_info::{VideoDescriptor, get_video_info, parse_probe_output};
pub use media_engine::{FfmpegEngine, MediaEngine};
pub use path_validator::{ensure_directory_exists, validate_directory_exists, validate_file_exists};
pub use video_scanner::{VideoFileInfo, scan_video_files};
